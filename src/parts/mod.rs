//! The part scripts.
//!
//! Every part is a parameter struct whose `Default` holds the measured
//! dimensions of the printed part. Building it runs a fixed sequence of
//! kernel calls and returns the finished solid.

use crate::config::{ConfigError, PartsConfig};
use crate::errors::ModelError;
use crate::mesh::Mesh;
use serde::de::DeserializeOwned;

pub mod aa_battery_holder;
pub mod ac_pir_detector_case;
pub mod curtain_blocker;
pub mod curtain_holder;
pub mod differential_stick;
pub mod gear_slotter;
pub mod guitar_saddle;
pub mod phone_s22_case;
pub mod pyramid_of_connectors;
pub mod screw;
pub mod solder_holder;
pub mod template_block;
pub mod test_cube;
pub mod wl_1865;

/// Tessellation settings shared by every part.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality {
    /// Segments used for a full circle.
    pub segments: usize,
}

impl Default for Quality {
    fn default() -> Self {
        Quality { segments: 64 }
    }
}

/// One printable design.
pub trait Part {
    /// Name used for the exported files and on the command line.
    fn name(&self) -> &'static str;
    fn description(&self) -> &'static str;
    fn build(&self, quality: &Quality) -> Result<Mesh, ModelError>;
}

/// Parameter sets that can be read from the `parts` table of the config.
pub trait PartParams: Part + DeserializeOwned + Default + 'static {
    const NAME: &'static str;
}

/// Names of all parts, in catalog order.
pub const PART_NAMES: [&str; 14] = [
    aa_battery_holder::AaBatteryHolder::NAME,
    ac_pir_detector_case::AcPirDetectorCase::NAME,
    curtain_blocker::CurtainBlocker::NAME,
    curtain_holder::CurtainHolder::NAME,
    differential_stick::DifferentialStick::NAME,
    gear_slotter::GearSlotter::NAME,
    guitar_saddle::GuitarSaddle::NAME,
    phone_s22_case::PhoneS22Case::NAME,
    pyramid_of_connectors::PyramidOfConnectors::NAME,
    screw::Screw::NAME,
    solder_holder::SolderHolder::NAME,
    template_block::TemplateBlock::NAME,
    test_cube::TestCube::NAME,
    wl_1865::Wl1865::NAME,
];

fn configured<P: PartParams>(config: &PartsConfig) -> Result<Box<dyn Part>, ConfigError> {
    Ok(Box::new(config.overrides_for::<P>(P::NAME)?))
}

/// Every part with its default parameters.
pub fn catalog() -> Vec<Box<dyn Part>> {
    vec![
        Box::new(aa_battery_holder::AaBatteryHolder::default()),
        Box::new(ac_pir_detector_case::AcPirDetectorCase::default()),
        Box::new(curtain_blocker::CurtainBlocker::default()),
        Box::new(curtain_holder::CurtainHolder::default()),
        Box::new(differential_stick::DifferentialStick::default()),
        Box::new(gear_slotter::GearSlotter::default()),
        Box::new(guitar_saddle::GuitarSaddle::default()),
        Box::new(phone_s22_case::PhoneS22Case::default()),
        Box::new(pyramid_of_connectors::PyramidOfConnectors::default()),
        Box::new(screw::Screw::default()),
        Box::new(solder_holder::SolderHolder::default()),
        Box::new(template_block::TemplateBlock::default()),
        Box::new(test_cube::TestCube::default()),
        Box::new(wl_1865::Wl1865::default()),
    ]
}

/// Every part with the overrides of `config` applied.
///
/// Fails on override entries naming a part that does not exist.
pub fn catalog_with(config: &PartsConfig) -> Result<Vec<Box<dyn Part>>, ConfigError> {
    if let Some(unknown) = config.parts.keys().find(|name| !PART_NAMES.contains(&name.as_str())) {
        return Err(ConfigError::UnknownPart(unknown.clone()));
    }
    Ok(vec![
        configured::<aa_battery_holder::AaBatteryHolder>(config)?,
        configured::<ac_pir_detector_case::AcPirDetectorCase>(config)?,
        configured::<curtain_blocker::CurtainBlocker>(config)?,
        configured::<curtain_holder::CurtainHolder>(config)?,
        configured::<differential_stick::DifferentialStick>(config)?,
        configured::<gear_slotter::GearSlotter>(config)?,
        configured::<guitar_saddle::GuitarSaddle>(config)?,
        configured::<phone_s22_case::PhoneS22Case>(config)?,
        configured::<pyramid_of_connectors::PyramidOfConnectors>(config)?,
        configured::<screw::Screw>(config)?,
        configured::<solder_holder::SolderHolder>(config)?,
        configured::<template_block::TemplateBlock>(config)?,
        configured::<test_cube::TestCube>(config)?,
        configured::<wl_1865::Wl1865>(config)?,
    ])
}

/// Look up one part by name in `parts`.
pub fn find<'a>(parts: &'a [Box<dyn Part>], name: &str) -> Option<&'a dyn Part> {
    parts.iter().find(|part| part.name() == name).map(|part| &**part)
}
