//! Static view descriptors that drive the showcase.
//!
//! A deck is an ordered, immutable sequence of views. Each view pins down
//! what the page shows while that view is active: overlay copy, background
//! gradient, model pose, and the material the model is tinted with. The
//! scroll tracker selects a view, the interpolator blends toward the next
//! one; nothing here mutates after startup.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Two-stop vertical gradient behind the product, linear RGB in [0, 1].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Background {
    pub top: [f32; 3],
    pub bottom: [f32; 3],
}

/// Material the whole model is tinted with while a view is active.
///
/// One variant per material kind, dispatched with `match` when lowering to
/// shader parameters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Material {
    /// Unlit flat color.
    Basic { color: [f32; 3] },
    /// Rough/metal shading.
    Standard {
        color: [f32; 3],
        roughness: f32,
        metalness: f32,
    },
    /// Standard plus a clearcoat lobe.
    Physical {
        color: [f32; 3],
        roughness: f32,
        metalness: f32,
        clearcoat: f32,
    },
    /// Debug shading from the surface normal.
    Normal,
}

/// Shading modes as the scene shader sees them.
pub const SHADING_BASIC: u32 = 0;
pub const SHADING_STANDARD: u32 = 1;
pub const SHADING_NORMAL: u32 = 2;

/// Flat parameter block a `Material` lowers to for the renderer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShadingParams {
    pub color: Vec3,
    pub roughness: f32,
    pub metalness: f32,
    pub clearcoat: f32,
    pub mode: u32,
}

impl Material {
    pub fn shading(&self) -> ShadingParams {
        match *self {
            Material::Basic { color } => ShadingParams {
                color: Vec3::from(color),
                roughness: 1.0,
                metalness: 0.0,
                clearcoat: 0.0,
                mode: SHADING_BASIC,
            },
            Material::Standard {
                color,
                roughness,
                metalness,
            } => ShadingParams {
                color: Vec3::from(color),
                roughness: roughness.clamp(0.03, 1.0),
                metalness: metalness.clamp(0.0, 1.0),
                clearcoat: 0.0,
                mode: SHADING_STANDARD,
            },
            Material::Physical {
                color,
                roughness,
                metalness,
                clearcoat,
            } => ShadingParams {
                color: Vec3::from(color),
                roughness: roughness.clamp(0.03, 1.0),
                metalness: metalness.clamp(0.0, 1.0),
                clearcoat: clearcoat.clamp(0.0, 1.0),
                mode: SHADING_STANDARD,
            },
            Material::Normal => ShadingParams {
                color: Vec3::ONE,
                roughness: 1.0,
                metalness: 0.0,
                clearcoat: 0.0,
                mode: SHADING_NORMAL,
            },
        }
    }
}

fn default_post() -> bool {
    true
}

/// One view of the showcase: overlay copy plus the pose and look of the
/// model while the view is active.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ViewDescriptor {
    pub title: String,
    pub description: String,
    pub background: Background,
    /// Model rotation in radians, applied as XYZ euler.
    pub rotation: Vec3,
    pub zoom: f32,
    pub material: Material,
    #[serde(default)]
    pub wireframe: bool,
    #[serde(default)]
    pub orbit: bool,
    #[serde(default = "default_post")]
    pub post: bool,
}

#[derive(Debug, Error)]
pub enum DeckError {
    #[error("view deck must contain at least one view")]
    Empty,
    #[error("view {index} (\"{title}\") has non-positive zoom {zoom}")]
    BadZoom {
        index: usize,
        title: String,
        zoom: f32,
    },
    #[error(transparent)]
    Parse(#[from] serde_json::Error),
}

/// Ordered, non-empty sequence of views, indexed `0..len()-1`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ViewDeck {
    views: Vec<ViewDescriptor>,
}

impl ViewDeck {
    pub fn new(views: Vec<ViewDescriptor>) -> Result<Self, DeckError> {
        if views.is_empty() {
            return Err(DeckError::Empty);
        }
        for (index, v) in views.iter().enumerate() {
            if !(v.zoom > 0.0) {
                return Err(DeckError::BadZoom {
                    index,
                    title: v.title.clone(),
                    zoom: v.zoom,
                });
            }
        }
        Ok(Self { views })
    }

    /// Parse a deck from JSON (an array of view descriptors).
    pub fn from_json(json: &str) -> Result<Self, DeckError> {
        let views: Vec<ViewDescriptor> = serde_json::from_str(json)?;
        Self::new(views)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.views.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }

    /// Fetch a view, clamping the index into range.
    #[inline]
    pub fn view(&self, index: usize) -> &ViewDescriptor {
        &self.views[index.min(self.views.len() - 1)]
    }

    /// Blend target for a view: its successor, or itself at the end of the
    /// deck (the final view eases toward its own values, a no-op).
    #[inline]
    pub fn next_index(&self, index: usize) -> usize {
        (index + 1).min(self.views.len() - 1)
    }

    pub fn views(&self) -> &[ViewDescriptor] {
        &self.views
    }
}

/// The built-in demo deck: a wristwatch walked through five views.
pub fn default_deck() -> ViewDeck {
    let views = vec![
        ViewDescriptor {
            title: "Meridian One".into(),
            description: "A mechanical chronograph, machined from a single billet and finished by hand.".into(),
            background: Background {
                top: [0.05, 0.07, 0.12],
                bottom: [0.01, 0.01, 0.03],
            },
            rotation: Vec3::new(0.15, -0.4, 0.0),
            zoom: 1.0,
            material: Material::Standard {
                color: [0.82, 0.84, 0.88],
                roughness: 0.35,
                metalness: 0.9,
            },
            wireframe: false,
            orbit: false,
            post: true,
        },
        ViewDescriptor {
            title: "Sapphire crystal".into(),
            description: "Nine millimeters of double-domed sapphire with inner anti-reflective coating.".into(),
            background: Background {
                top: [0.04, 0.10, 0.16],
                bottom: [0.01, 0.02, 0.05],
            },
            rotation: Vec3::new(0.55, 0.6, 0.0),
            zoom: 1.35,
            material: Material::Physical {
                color: [0.55, 0.72, 0.9],
                roughness: 0.08,
                metalness: 0.2,
                clearcoat: 1.0,
            },
            wireframe: false,
            orbit: false,
            post: true,
        },
        ViewDescriptor {
            title: "Grade 5 titanium".into(),
            description: "Forged case and crown, bead-blasted to a warm matte grey.".into(),
            background: Background {
                top: [0.10, 0.09, 0.08],
                bottom: [0.02, 0.02, 0.02],
            },
            rotation: Vec3::new(-0.25, 2.4, 0.1),
            zoom: 1.15,
            material: Material::Standard {
                color: [0.62, 0.6, 0.58],
                roughness: 0.55,
                metalness: 1.0,
            },
            wireframe: false,
            orbit: false,
            post: true,
        },
        ViewDescriptor {
            title: "Engineered inside".into(),
            description: "Eighty-one components, visible here as raw geometry.".into(),
            background: Background {
                top: [0.02, 0.03, 0.04],
                bottom: [0.0, 0.0, 0.01],
            },
            rotation: Vec3::new(0.35, 3.6, 0.0),
            zoom: 1.5,
            material: Material::Basic {
                color: [0.45, 0.9, 0.75],
            },
            wireframe: true,
            orbit: false,
            post: false,
        },
        ViewDescriptor {
            title: "Make it yours".into(),
            description: "Drag to turn it over. Straps and bezels swap without tools.".into(),
            background: Background {
                top: [0.08, 0.05, 0.11],
                bottom: [0.02, 0.01, 0.03],
            },
            rotation: Vec3::new(0.1, 5.2, 0.0),
            zoom: 1.25,
            material: Material::Standard {
                color: [0.85, 0.68, 0.45],
                roughness: 0.3,
                metalness: 0.85,
            },
            wireframe: false,
            orbit: true,
            post: true,
        },
    ];
    ViewDeck::new(views).expect("built-in deck is valid")
}
