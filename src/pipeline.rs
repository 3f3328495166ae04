//! The request-level façade tying admission, decoding, analysis and rendering
//! together.
//!
//! Analysis and rendering fail differently. [`IconPipeline::analyze`] only
//! rejects uploads the admission gate refuses; anything that goes wrong after
//! that is logged and answered with [`ColorAnalysisResult::fallback`].
//! [`IconPipeline::generate`] aborts on the first failure and returns no
//! partial output.
//!
//! # Example
//!
//! ```
//! use std::io::Cursor;
//!
//! use image::{ImageFormat, Rgba, RgbaImage};
//! use iconset_renderer::{IconPipeline, Reasoning, RenderOptions};
//!
//! let source = RgbaImage::from_pixel(32, 32, Rgba([200, 40, 40, 255]));
//! let mut png = Vec::new();
//! source.write_to(&mut Cursor::new(&mut png), ImageFormat::Png).unwrap();
//!
//! let pipeline = IconPipeline::new();
//!
//! let analysis = pipeline.analyze(&png, "image/png").unwrap();
//! assert_eq!(analysis.dominant_colors[0], "#c82828");
//! assert_ne!(analysis.reasoning, Reasoning::ErrorFallback);
//!
//! let options = RenderOptions::new().with_background_color(&analysis.suggested_background_color);
//! let icons = pipeline.generate(&png, "image/png", &options).unwrap();
//! assert_eq!(icons.len(), 8);
//! assert!(icons[0].url.starts_with("data:image/png;base64,"));
//! ```

use crate::advisor::{BackgroundAdvisor, ColorAnalysisResult};
use crate::assemble::{self, GeneratedIcon, RenderedIcon};
use crate::error::{AnalysisError, GenerateError, ValidationError};
use crate::options::RenderOptions;
use crate::registry::IconRegistry;
use crate::render::IconRenderer;
use crate::sampler::ColorSampler;
use crate::source::{SourceImage, SourceMime, UploadPolicy};

/// Stateless entry point for color analysis and icon generation.
///
/// A pipeline holds only configuration, so one instance can serve any
/// number of requests, from any number of threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct IconPipeline {
    policy: UploadPolicy,
    registry: IconRegistry,
    sampler: ColorSampler,
    advisor: BackgroundAdvisor,
}

impl IconPipeline {
    /// The default upload policy and the built-in registry.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(mut self, policy: UploadPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_registry(mut self, registry: IconRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn policy(&self) -> &UploadPolicy {
        &self.policy
    }

    pub fn registry(&self) -> &IconRegistry {
        &self.registry
    }

    /// Suggests a background color for the upload.
    ///
    /// Only admission can fail. Decode and sampling failures degrade to
    /// [`ColorAnalysisResult::fallback`].
    pub fn analyze(&self, bytes: &[u8], mime: &str) -> Result<ColorAnalysisResult, ValidationError> {
        let mime = self.policy.admit(bytes, mime)?;
        match self.try_analyze(bytes, mime) {
            Ok(result) => {
                log::debug!(
                    "suggested {} ({})",
                    result.suggested_background_color,
                    result.reasoning
                );
                Ok(result)
            }
            Err(err) => {
                log::warn!("color analysis failed, using fallback: {err}");
                Ok(ColorAnalysisResult::fallback())
            }
        }
    }

    fn try_analyze(&self, bytes: &[u8], mime: SourceMime) -> Result<ColorAnalysisResult, AnalysisError> {
        let source = SourceImage::decode(bytes, mime)?;
        let samples = self.sampler.sample(&source)?;
        Ok(self.advisor.analyze(&samples))
    }

    /// Renders every selected spec and keeps the raw PNG buffers.
    pub fn render(
        &self,
        bytes: &[u8],
        mime: &str,
        options: &RenderOptions,
    ) -> Result<Vec<RenderedIcon>, GenerateError> {
        let mime = self.policy.admit(bytes, mime)?;
        let background = options.background()?;

        let source = SourceImage::decode(bytes, mime).map_err(|err| {
            log::error!("failed to decode {} upload: {err}", mime.as_str());
            err
        })?;

        let specs = self.registry.select(options.include_splash);
        log::debug!(
            "rendering {} specs from {}x{} source",
            specs.len(),
            source.width(),
            source.height()
        );
        IconRenderer::new(background).render_all(&specs, &source)
    }

    /// Renders every selected spec and packages the results as data URLs,
    /// in registry order.
    pub fn generate(
        &self,
        bytes: &[u8],
        mime: &str,
        options: &RenderOptions,
    ) -> Result<Vec<GeneratedIcon>, GenerateError> {
        self.render(bytes, mime, options).map(assemble::assemble)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::advisor::Reasoning;
    use crate::color::{self, Rgb};
    use crate::error::DecodeError;
    use crate::source::tests::{jpeg_bytes, png_bytes};
    use image::{Rgba, RgbaImage, RgbImage};
    use std::collections::HashSet;

    fn opaque_png(width: u32, height: u32) -> Vec<u8> {
        png_bytes(&RgbaImage::from_fn(width, height, |x, y| {
            Rgba([(x * 7 % 256) as u8, (y * 5 % 256) as u8, 90, 255])
        }))
    }

    /// Blue 10px frame around a red center, with an alpha channel.
    fn framed_png() -> Vec<u8> {
        png_bytes(&RgbaImage::from_fn(100, 100, |x, y| {
            if x < 10 || y < 10 || x >= 90 || y >= 90 {
                Rgba([0, 0, 255, 255])
            } else {
                Rgba([255, 0, 0, 255])
            }
        }))
    }

    fn dims(icon: &RenderedIcon) -> (u32, u32) {
        image::load_from_memory(icon.png()).unwrap().to_rgba8().dimensions()
    }

    #[test]
    fn square_icons_are_1024_for_opaque_jpeg() {
        let jpeg = jpeg_bytes(&RgbImage::from_pixel(64, 64, image::Rgb([30, 160, 90])));
        let icons = IconPipeline::new()
            .render(&jpeg, "image/jpeg", &RenderOptions::new())
            .unwrap();
        for name in ["icon", "adaptive-icon"] {
            let icon = icons.iter().find(|i| i.name() == name).unwrap();
            assert_eq!(dims(icon), (1024, 1024), "{name}");
        }
    }

    #[test]
    fn every_output_matches_its_spec() {
        let icons = IconPipeline::new()
            .render(&opaque_png(40, 70), "image/png", &RenderOptions::new().with_splash(true))
            .unwrap();
        assert_eq!(icons.len(), 9);
        for icon in &icons {
            assert_eq!(dims(icon), (icon.spec().width, icon.spec().height), "{}", icon.name());
        }
    }

    #[test]
    fn blue_edges_win_over_red_center() {
        let result = IconPipeline::new().analyze(&framed_png(), "image/png").unwrap();
        assert_eq!(result.suggested_background_color, "#0000ff");
        assert_eq!(result.reasoning, Reasoning::Edges);
        assert!(result.has_transparency);
        assert_eq!(result.dominant_colors, ["#ff0000", "#0000ff"]);
        assert_eq!(result.edge_colors, ["#0000ff"]);
    }

    #[test]
    fn gray_jpeg_gets_complementary() {
        let jpeg = jpeg_bytes(&RgbImage::from_pixel(50, 50, image::Rgb([128, 128, 128])));
        let result = IconPipeline::new().analyze(&jpeg, "image/jpeg").unwrap();
        assert!(!result.has_transparency);
        assert_eq!(result.reasoning, Reasoning::ComplementaryNoTransparency);
        assert_ne!(result.suggested_background_color, "#808080");

        let dominant = color::parse_hex(&result.dominant_colors[0]).unwrap();
        let suggested = color::parse_hex(&result.suggested_background_color).unwrap();
        if color::perceived_luminance(dominant) > 0.5 {
            assert!(suggested.red < dominant.red);
        } else {
            assert!(suggested.red > dominant.red);
        }
    }

    #[test]
    fn partial_logo_is_fixed_size_for_any_aspect() {
        let pipeline = IconPipeline::new();
        for (w, h) in [(60, 60), (30, 90), (90, 30)] {
            let icons = pipeline
                .render(&opaque_png(w, h), "image/png", &RenderOptions::new())
                .unwrap();
            let partial = icons.iter().find(|i| i.name() == "partial-react-logo").unwrap();
            assert_eq!(dims(partial), (518, 316), "source {w}x{h}");
        }
    }

    #[test]
    fn splash_only_when_enabled() {
        let pipeline = IconPipeline::new();
        let png = opaque_png(16, 16);

        let without = pipeline.generate(&png, "image/png", &RenderOptions::new()).unwrap();
        assert!(without.iter().all(|i| i.name != "splash"));
        assert!(without.iter().any(|i| i.name == "splash-icon"));

        let with = pipeline
            .generate(&png, "image/png", &RenderOptions::new().with_splash(true))
            .unwrap();
        let splash = with.iter().find(|i| i.name == "splash").unwrap();
        assert_eq!(splash.size, "1284×2778px (Splash screen)");
    }

    #[test]
    fn splash_background_uses_requested_color() {
        let options = RenderOptions::new().with_background(Rgb::new(10, 20, 30)).with_splash(true);
        let icons = IconPipeline::new()
            .render(&opaque_png(16, 16), "image/png", &options)
            .unwrap();
        let splash = icons.iter().find(|i| i.name() == "splash").unwrap();
        let img = image::load_from_memory(splash.png()).unwrap().to_rgba8();
        assert_eq!(img.get_pixel(0, 0).0, [10, 20, 30, 255]);
    }

    #[test]
    fn generation_is_deterministic() {
        let pipeline = IconPipeline::new();
        let png = framed_png();
        let options = RenderOptions::new().with_splash(true);
        let a = pipeline.generate(&png, "image/png", &options).unwrap();
        let b = pipeline.generate(&png, "image/png", &options).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn names_are_unique_and_in_registry_order() {
        let icons = IconPipeline::new()
            .generate(&opaque_png(20, 20), "image/png", &RenderOptions::new().with_splash(true))
            .unwrap();
        let names: Vec<_> = icons.iter().map(|i| i.name.as_str()).collect();
        let unique: HashSet<_> = names.iter().collect();
        assert_eq!(unique.len(), names.len());
        let expected: Vec<_> = IconRegistry::standard().iter().map(|s| s.name).collect();
        assert_eq!(names, expected);
    }

    #[test]
    fn corrupt_bytes_fail_the_whole_batch() {
        let err = IconPipeline::new()
            .generate(b"definitely not a png", "image/png", &RenderOptions::new())
            .unwrap_err();
        assert!(matches!(err, GenerateError::Decode(_)));
        assert!(!err.is_client_error());
    }

    #[test]
    fn other_raster_format_behind_allowed_mime_fails() {
        let bmp = b"BM\x3a\0\0\0\0\0\0\0\x36\0\0\0\x28\0\0\0";
        let err = IconPipeline::new()
            .generate(bmp, "image/png", &RenderOptions::new())
            .unwrap_err();
        assert!(matches!(
            err,
            GenerateError::Decode(DecodeError::UnsupportedFormat { .. })
        ));
        assert!(!err.is_client_error());

        let gif = b"GIF89a\x01\0\x01\0\0\0\0";
        assert!(IconPipeline::new()
            .render(gif, "image/jpeg", &RenderOptions::new())
            .is_err());
    }

    #[test]
    fn unsupported_mime_is_rejected_before_decode() {
        let err = IconPipeline::new()
            .generate(&opaque_png(4, 4), "image/gif", &RenderOptions::new())
            .unwrap_err();
        assert!(matches!(
            err,
            GenerateError::Validation(ValidationError::UnsupportedMime(_))
        ));
        assert!(err.is_client_error());
    }

    #[test]
    fn bad_background_is_a_validation_error() {
        let err = IconPipeline::new()
            .generate(&opaque_png(4, 4), "image/png", &RenderOptions::new().with_background_color("#12"))
            .unwrap_err();
        assert!(matches!(
            err,
            GenerateError::Validation(ValidationError::InvalidColor(_))
        ));
    }

    #[test]
    fn oversized_upload_is_rejected() {
        let pipeline = IconPipeline::new().with_policy(UploadPolicy::with_max_bytes(16));
        let png = opaque_png(8, 8);
        assert!(matches!(
            pipeline.analyze(&png, "image/png"),
            Err(ValidationError::TooLarge { .. })
        ));
        assert!(pipeline.generate(&png, "image/png", &RenderOptions::new()).is_err());
    }

    #[test]
    fn analysis_of_corrupt_bytes_falls_back() {
        let result = IconPipeline::new().analyze(&[1, 2, 3, 4], "image/png").unwrap();
        assert_eq!(result, ColorAnalysisResult::fallback());
        assert_eq!(result.suggested_background_color, "#ffffff");
        assert_eq!(result.reasoning, Reasoning::ErrorFallback);
    }

    #[test]
    fn analysis_of_invisible_image_falls_back() {
        let png = png_bytes(&RgbaImage::from_pixel(10, 10, Rgba([50, 50, 50, 0])));
        let result = IconPipeline::new().analyze(&png, "image/png").unwrap();
        assert_eq!(result.reasoning, Reasoning::ErrorFallback);
    }

    #[test]
    fn degenerate_crop_names_failing_spec() {
        let err = IconPipeline::new()
            .generate(&opaque_png(1, 1), "image/png", &RenderOptions::new())
            .unwrap_err();
        assert_eq!(err.failed_spec(), Some("partial-react-logo"));
        assert_eq!(err.public_message(), "Failed to process partial-react-logo");
    }

    #[test]
    fn svg_sources_render() {
        let svg = br##"<svg xmlns="http://www.w3.org/2000/svg" width="20" height="10">
            <rect width="20" height="10" fill="#00ff00"/>
        </svg>"##;
        let pipeline = IconPipeline::new();
        let analysis = pipeline.analyze(svg, "image/svg+xml").unwrap();
        assert!(analysis.has_transparency);
        assert_eq!(analysis.dominant_colors[0], "#00ff00");

        let icons = pipeline.render(svg, "image/svg+xml", &RenderOptions::new()).unwrap();
        let icon = icons.iter().find(|i| i.name() == "icon").unwrap();
        assert_eq!(dims(icon), (1024, 1024));
    }
}
