use crate::{
    layout::{
        Field,
        PayloadLayout,
    },
    Error,
};

const FIELDS: &[Field] = &[Field::byte("temperature", 0)];
pub const LAYOUT: PayloadLayout = PayloadLayout::new(1, FIELDS);

/// A target temperature as the controller stores it.
///
/// The byte is whole degrees when the controller is in Fahrenheit and half degrees when it is
/// in Celsius. Which applies is controller state, so only the raw value travels on the wire.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct SpaTemperature {
    pub raw: u8,
}

impl SpaTemperature {
    #[inline]
    pub const fn raw(raw: u8) -> Self {
        Self {
            raw,
        }
    }

    #[inline]
    pub const fn fahrenheit(degrees: u8) -> Self {
        Self::raw(degrees)
    }

    /// Rounds to the nearest half degree.
    pub fn celsius(degrees: f32) -> Result<Self, Error> {
        let doubled = (degrees * 2.0).round();

        if !(0.0..=u8::MAX as f32).contains(&doubled) {
            return Err(Error::OutOfRange {
                field: "temperature",
                value: doubled.max(0.0) as usize,
                max:   u8::MAX as usize / 2,
            });
        }

        Ok(Self::raw(doubled as u8))
    }

    #[inline]
    pub fn as_celsius(&self) -> f32 {
        self.raw as f32 / 2.0
    }
}
