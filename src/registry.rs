//! The catalog of icon assets rendered from one source image.
//!
//! The catalog is a `static` slice: built at compile time, never mutated, and
//! iterated in declaration order. Consumers rely on that order for
//! reproducible output lists.

use serde::{Deserialize, Serialize};

use crate::geometry::SizePx;
use crate::render::{CroppedRegion, PaddedComposite, StandardFit, Strategy};

/// What kind of asset a spec produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "tsify", derive(tsify_next::Tsify))]
pub enum IconCategory {
    Icon,
    Favicon,
    Logo,
    Splash,
}

/// When a spec takes part in a render batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Inclusion {
    Always,
    /// Only when the caller enabled the splash screen.
    SplashEnabled,
}

impl Inclusion {
    pub fn admits(&self, include_splash: bool) -> bool {
        match self {
            Self::Always => true,
            Self::SplashEnabled => include_splash,
        }
    }
}

/// One output asset: a name, exact pixel dimensions and how to get there.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IconSpec {
    /// File stem; unique within a registry.
    pub name: &'static str,
    pub width: u32,
    pub height: u32,
    pub strategy: Strategy,
    pub category: IconCategory,
    pub inclusion: Inclusion,
    /// Human description shown next to the pixel size.
    pub description: &'static str,
}

impl IconSpec {
    pub const fn new(
        name: &'static str,
        width: u32,
        height: u32,
        strategy: Strategy,
        category: IconCategory,
        description: &'static str,
    ) -> Self {
        Self {
            name,
            width,
            height,
            strategy,
            category,
            inclusion: Inclusion::Always,
            description,
        }
    }

    /// Marks the spec as rendered only when splash output is enabled.
    pub const fn splash_only(mut self) -> Self {
        self.inclusion = Inclusion::SplashEnabled;
        self
    }

    pub fn size(&self) -> SizePx {
        SizePx::new(self.width, self.height)
    }

    /// E.g. `1024×1024px (App icon)`.
    pub fn size_description(&self) -> String {
        format!("{}×{}px ({})", self.width, self.height, self.description)
    }
}

const FIT: Strategy = Strategy::StandardFit(StandardFit);

/// Every asset the pipeline knows how to render, in output order.
pub static ICON_SPECS: [IconSpec; 9] = [
    IconSpec::new("adaptive-icon", 1024, 1024, FIT, IconCategory::Icon, "Android adaptive icon"),
    IconSpec::new("favicon", 48, 48, FIT, IconCategory::Favicon, "Web favicon"),
    IconSpec::new("icon", 1024, 1024, FIT, IconCategory::Icon, "App icon"),
    IconSpec::new("react-logo", 100, 100, FIT, IconCategory::Logo, "React logo"),
    IconSpec::new("react-logo@2x", 200, 200, FIT, IconCategory::Logo, "React logo @2x"),
    IconSpec::new("react-logo@3x", 300, 300, FIT, IconCategory::Logo, "React logo @3x"),
    IconSpec::new(
        "splash-icon",
        1024,
        1024,
        Strategy::PaddedComposite(PaddedComposite::transparent(0.8)),
        IconCategory::Splash,
        "Splash screen icon",
    ),
    IconSpec::new(
        "splash",
        1284,
        2778,
        Strategy::PaddedComposite(PaddedComposite::requested(0.5)),
        IconCategory::Splash,
        "Splash screen",
    )
    .splash_only(),
    IconSpec::new(
        "partial-react-logo",
        518,
        316,
        Strategy::CroppedRegion(CroppedRegion::top_right(0.6, 0.4)),
        IconCategory::Logo,
        "Partial React logo",
    ),
];

/// A read-only view over a spec catalog.
#[derive(Debug, Clone, Copy)]
pub struct IconRegistry {
    specs: &'static [IconSpec],
}

impl Default for IconRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

impl IconRegistry {
    /// The built-in catalog.
    pub fn standard() -> Self {
        Self::new(&ICON_SPECS)
    }

    pub const fn new(specs: &'static [IconSpec]) -> Self {
        Self { specs }
    }

    pub fn specs(&self) -> &'static [IconSpec] {
        self.specs
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&'static IconSpec> {
        self.specs.iter().find(|spec| spec.name == name)
    }

    /// The specs that take part in a batch, in catalog order.
    pub fn select(&self, include_splash: bool) -> Vec<&'static IconSpec> {
        self.specs
            .iter()
            .filter(|spec| spec.inclusion.admits(include_splash))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'static IconSpec> {
        self.specs.iter()
    }
}
