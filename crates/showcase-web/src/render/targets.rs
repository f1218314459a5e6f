use super::helpers;
use wgpu;

/// Offscreen targets for the render pipeline.
///
/// Full-resolution HDR scene color plus depth, and two half-resolution
/// bloom ping-pong textures. Views are pre-created for convenience.
pub(crate) struct RenderTargets {
    #[allow(dead_code)]
    pub(crate) hdr_tex: wgpu::Texture,
    pub(crate) hdr_view: wgpu::TextureView,
    #[allow(dead_code)]
    pub(crate) depth_tex: wgpu::Texture,
    pub(crate) depth_view: wgpu::TextureView,
    pub(crate) bloom_a: wgpu::Texture,
    pub(crate) bloom_a_view: wgpu::TextureView,
    #[allow(dead_code)]
    pub(crate) bloom_b: wgpu::Texture,
    pub(crate) bloom_b_view: wgpu::TextureView,
}

pub(crate) const HDR_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba16Float;

impl RenderTargets {
    pub(crate) fn create(device: &wgpu::Device, width: u32, height: u32) -> Self {
        let (hdr_tex, hdr_view) = helpers::create_color_texture(
            device,
            "hdr_tex",
            width.max(1),
            height.max(1),
            HDR_FORMAT,
            wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
        );
        let (depth_tex, depth_view) = helpers::create_depth_texture(device, width.max(1), height.max(1));
        let bw = (width.max(1) / 2).max(1);
        let bh = (height.max(1) / 2).max(1);
        let (bloom_a, bloom_a_view) = helpers::create_color_texture(
            device,
            "bloom_a",
            bw,
            bh,
            HDR_FORMAT,
            wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
        );
        let (bloom_b, bloom_b_view) = helpers::create_color_texture(
            device,
            "bloom_b",
            bw,
            bh,
            HDR_FORMAT,
            wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
        );
        Self {
            hdr_tex,
            hdr_view,
            depth_tex,
            depth_view,
            bloom_a,
            bloom_a_view,
            bloom_b,
            bloom_b_view,
        }
    }

    pub(crate) fn recreate(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        *self = Self::create(device, width, height);
    }

    #[inline]
    pub(crate) fn bloom_size(&self) -> (u32, u32) {
        let size = self.bloom_a.size();
        (size.width, size.height)
    }
}
