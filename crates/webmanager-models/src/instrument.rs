//! Instrument configurations attached to a scheduling block.

use serde::{Deserialize, Serialize};

/// Observing mode of the high-resolution spectrograph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum HrsMode {
    #[default]
    LowResolution,
    MediumResolution,
    HighResolution,
    HighStability,
}

impl HrsMode {
    /// Human-readable mode name.
    pub fn as_str(&self) -> &'static str {
        match self {
            HrsMode::LowResolution => "Low Resolution",
            HrsMode::MediumResolution => "Medium Resolution",
            HrsMode::HighResolution => "High Resolution",
            HrsMode::HighStability => "High Stability",
        }
    }
}

/// Configuration of one instrument used by a block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InstrumentConfig {
    /// Long-slit spectrograph.
    Spectrograph {
        grating: String,
        slit_width_arcsec: f64,
        exposure_time_secs: f64,
    },
    /// Imaging camera.
    Imager {
        filter: String,
        exposure_time_secs: f64,
        #[serde(default = "default_cycles")]
        cycles: u32,
    },
    /// High-resolution echelle spectrograph.
    HighResolutionSpectrograph {
        mode: HrsMode,
        exposure_time_secs: f64,
    },
    /// Imaging polarimeter.
    ImagingPolarimeter {
        mode: String,
        filter: String,
        exposure_time_secs: f64,
    },
}

fn default_cycles() -> u32 {
    1
}

impl InstrumentConfig {
    /// Display name of the instrument.
    pub fn name(&self) -> &'static str {
        match self {
            InstrumentConfig::Spectrograph { .. } => "Spectrograph",
            InstrumentConfig::Imager { .. } => "Imager",
            InstrumentConfig::HighResolutionSpectrograph { .. } => "High Resolution Spectrograph",
            InstrumentConfig::ImagingPolarimeter { .. } => "Imaging Polarimeter",
        }
    }

    /// Total exposure time in seconds, including repeated cycles.
    pub fn exposure_time_secs(&self) -> f64 {
        match self {
            InstrumentConfig::Spectrograph {
                exposure_time_secs, ..
            }
            | InstrumentConfig::HighResolutionSpectrograph {
                exposure_time_secs, ..
            }
            | InstrumentConfig::ImagingPolarimeter {
                exposure_time_secs, ..
            } => *exposure_time_secs,
            InstrumentConfig::Imager {
                exposure_time_secs,
                cycles,
                ..
            } => *exposure_time_secs * f64::from(*cycles),
        }
    }

    /// One-line description of the instrument settings.
    pub fn describe(&self) -> String {
        match self {
            InstrumentConfig::Spectrograph {
                grating,
                slit_width_arcsec,
                ..
            } => format!("grating {}, slit {:.2}\"", grating, slit_width_arcsec),
            InstrumentConfig::Imager { filter, cycles, .. } => {
                format!("filter {}, {} cycle(s)", filter, cycles)
            }
            InstrumentConfig::HighResolutionSpectrograph { mode, .. } => {
                format!("mode {}", mode.as_str())
            }
            InstrumentConfig::ImagingPolarimeter { mode, filter, .. } => {
                format!("mode {}, filter {}", mode, filter)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_tagged_configs() {
        let json = r#"[
            {"type": "spectrograph", "grating": "PG0900", "slit_width_arcsec": 1.5, "exposure_time_secs": 600},
            {"type": "imager", "filter": "V", "exposure_time_secs": 30},
            {"type": "high_resolution_spectrograph", "mode": "high_stability", "exposure_time_secs": 1200},
            {"type": "imaging_polarimeter", "mode": "linear", "filter": "R", "exposure_time_secs": 90}
        ]"#;

        let configs: Vec<InstrumentConfig> = serde_json::from_str(json).unwrap();
        assert_eq!(configs.len(), 4);
        assert_eq!(configs[0].name(), "Spectrograph");
        assert!(matches!(configs[1], InstrumentConfig::Imager { cycles: 1, .. }));
        assert!(matches!(
            configs[2],
            InstrumentConfig::HighResolutionSpectrograph {
                mode: HrsMode::HighStability,
                ..
            }
        ));
        assert_eq!(configs[3].describe(), "mode linear, filter R");
    }

    #[test]
    fn test_imager_exposure_includes_cycles() {
        let imager = InstrumentConfig::Imager {
            filter: "B".to_string(),
            exposure_time_secs: 20.0,
            cycles: 3,
        };
        assert_eq!(imager.exposure_time_secs(), 60.0);
    }
}
