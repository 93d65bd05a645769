#![allow(clippy::upper_case_acronyms)]

/// Represents the register addresses in the ADS111x ADC.
#[derive(Clone, Copy)]
#[repr(u8)]
pub enum Register {
    /// Conversion Result Register
    Conversion = 0x00,
    /// Configuration Register
    Config,
    /// Low Threshold Register
    LoThresh,
    /// High Threshold Register
    HiThresh,
}

/// Trait for one bit-field of the 16-bit config register.
///
/// The masks of all implementors are pairwise disjoint and together
/// cover the full register width.
pub(crate) trait ConfigField: Sized {
    const MASK: u16;
    const SHIFT: u8;

    /// Decodes the field from its (already shifted-down) bit pattern.
    fn from_bits(bits: u16) -> Self;

    /// The field's unshifted bit pattern.
    fn bits(self) -> u16;

    /// Decodes the field out of a full config register value.
    fn from_config(config: u16) -> Self {
        Self::from_bits((config & Self::MASK) >> Self::SHIFT)
    }

    /// Replaces this field in `config`, leaving all other bits unchanged.
    fn insert(self, config: u16) -> u16 {
        (config & !Self::MASK) | (self.bits() << Self::SHIFT)
    }
}

/// Operational status, bit 15 of the config register.
///
/// Reads report whether a conversion is in progress. Writing the bit
/// as 1 requests a single conversion while in single-shot mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Status {
    /// A conversion is currently being performed.
    Busy = 0,
    /// No conversion is currently being performed.
    Idle = 1,
}

impl ConfigField for Status {
    const MASK: u16 = 0x8000;
    const SHIFT: u8 = 15;

    fn from_bits(bits: u16) -> Self {
        match bits {
            0 => Self::Busy,
            _ => Self::Idle,
        }
    }

    fn bits(self) -> u16 {
        self as u16
    }
}

/// Input multiplexer selection (ADS1115 only), bits 14:12.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Mux {
    /// AIN0 (pos) and AIN1 (neg), the power-on default.
    Ain0Ain1 = 0b000,
    /// AIN0 (pos) and AIN3 (neg).
    Ain0Ain3 = 0b001,
    /// AIN1 (pos) and AIN3 (neg).
    Ain1Ain3 = 0b010,
    /// AIN2 (pos) and AIN3 (neg).
    Ain2Ain3 = 0b011,
    /// AIN0 (pos) and GND (neg).
    Ain0Gnd = 0b100,
    /// AIN1 (pos) and GND (neg).
    Ain1Gnd = 0b101,
    /// AIN2 (pos) and GND (neg).
    Ain2Gnd = 0b110,
    /// AIN3 (pos) and GND (neg).
    Ain3Gnd = 0b111,
}

impl ConfigField for Mux {
    const MASK: u16 = 0x7000;
    const SHIFT: u8 = 12;

    fn from_bits(bits: u16) -> Self {
        match bits {
            0b000 => Self::Ain0Ain1,
            0b001 => Self::Ain0Ain3,
            0b010 => Self::Ain1Ain3,
            0b011 => Self::Ain2Ain3,
            0b100 => Self::Ain0Gnd,
            0b101 => Self::Ain1Gnd,
            0b110 => Self::Ain2Gnd,
            _ => Self::Ain3Gnd,
        }
    }

    fn bits(self) -> u16 {
        self as u16
    }
}

/// Full-scale input range, bits 11:9.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum FullScale {
    /// +/- 6.144 V.
    Fs6v144 = 0b000,
    /// +/- 4.096 V.
    Fs4v096 = 0b001,
    /// +/- 2.048 V, the power-on default.
    Fs2v048 = 0b010,
    /// +/- 1.024 V.
    Fs1v024 = 0b011,
    /// +/- 0.512 V.
    Fs0v512 = 0b100,
    /// +/- 0.256 V.
    Fs0v256 = 0b101,
}

impl FullScale {
    /// Minimum and maximum input voltage of this range.
    pub fn min_max(self) -> (f32, f32) {
        match self {
            Self::Fs6v144 => (-6.144, 6.144),
            Self::Fs4v096 => (-4.096, 4.096),
            Self::Fs2v048 => (-2.048, 2.048),
            Self::Fs1v024 => (-1.024, 1.024),
            Self::Fs0v512 => (-0.512, 0.512),
            Self::Fs0v256 => (-0.256, 0.256),
        }
    }

    /// Width of the range, max minus min.
    pub fn width(self) -> f32 {
        let (min, max) = self.min_max();
        max - min
    }
}

impl ConfigField for FullScale {
    const MASK: u16 = 0x0E00;
    const SHIFT: u8 = 9;

    fn from_bits(bits: u16) -> Self {
        match bits {
            0b000 => Self::Fs6v144,
            0b001 => Self::Fs4v096,
            0b010 => Self::Fs2v048,
            0b011 => Self::Fs1v024,
            0b100 => Self::Fs0v512,
            // 0b101, 0b110 and 0b111 all select +/- 0.256 V.
            _ => Self::Fs0v256,
        }
    }

    fn bits(self) -> u16 {
        self as u16
    }
}

/// Conversion mode, bit 8.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Mode {
    /// Continuous conversion mode.
    Continuous = 0,
    /// Power-down single-shot mode, the power-on default.
    SingleShot = 1,
}

impl ConfigField for Mode {
    const MASK: u16 = 0x0100;
    const SHIFT: u8 = 8;

    fn from_bits(bits: u16) -> Self {
        match bits {
            0 => Self::Continuous,
            _ => Self::SingleShot,
        }
    }

    fn bits(self) -> u16 {
        self as u16
    }
}

/// Data rate in samples per second, bits 7:5.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum DataRate {
    SPS8 = 0b000,
    SPS16 = 0b001,
    SPS32 = 0b010,
    SPS64 = 0b011,
    /// The power-on default.
    SPS128 = 0b100,
    SPS250 = 0b101,
    SPS475 = 0b110,
    SPS860 = 0b111,
}

impl ConfigField for DataRate {
    const MASK: u16 = 0x00E0;
    const SHIFT: u8 = 5;

    fn from_bits(bits: u16) -> Self {
        match bits {
            0b000 => Self::SPS8,
            0b001 => Self::SPS16,
            0b010 => Self::SPS32,
            0b011 => Self::SPS64,
            0b100 => Self::SPS128,
            0b101 => Self::SPS250,
            0b110 => Self::SPS475,
            _ => Self::SPS860,
        }
    }

    fn bits(self) -> u16 {
        self as u16
    }
}

/// Comparator mode, bit 4.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum ComparatorMode {
    /// Traditional comparator with hysteresis, the power-on default.
    Traditional = 0,
    /// Window comparator.
    Window = 1,
}

impl ConfigField for ComparatorMode {
    const MASK: u16 = 0x0010;
    const SHIFT: u8 = 4;

    fn from_bits(bits: u16) -> Self {
        match bits {
            0 => Self::Traditional,
            _ => Self::Window,
        }
    }

    fn bits(self) -> u16 {
        self as u16
    }
}

/// ALERT/RDY pin polarity, bit 3.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum ComparatorPolarity {
    /// Active low, the power-on default.
    ActiveLow = 0,
    /// Active high.
    ActiveHigh = 1,
}

impl ConfigField for ComparatorPolarity {
    const MASK: u16 = 0x0008;
    const SHIFT: u8 = 3;

    fn from_bits(bits: u16) -> Self {
        match bits {
            0 => Self::ActiveLow,
            _ => Self::ActiveHigh,
        }
    }

    fn bits(self) -> u16 {
        self as u16
    }
}

/// Comparator latching, bit 2.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum ComparatorLatching {
    /// Non-latching, the power-on default.
    NonLatching = 0,
    /// Latching until conversion data is read.
    Latching = 1,
}

impl ConfigField for ComparatorLatching {
    const MASK: u16 = 0x0004;
    const SHIFT: u8 = 2;

    fn from_bits(bits: u16) -> Self {
        match bits {
            0 => Self::NonLatching,
            _ => Self::Latching,
        }
    }

    fn bits(self) -> u16 {
        self as u16
    }
}

/// Comparator queue, bits 1:0.
///
/// Number of successive conversions exceeding a threshold before the
/// ALERT/RDY pin is asserted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum ComparatorQueue {
    /// Assert after one conversion.
    AfterOne = 0b00,
    /// Assert after two conversions.
    AfterTwo = 0b01,
    /// Assert after four conversions.
    AfterFour = 0b10,
    /// Comparator disabled, ALERT/RDY held high-impedance. The
    /// power-on default.
    Disabled = 0b11,
}

impl ConfigField for ComparatorQueue {
    const MASK: u16 = 0x0003;
    const SHIFT: u8 = 0;

    fn from_bits(bits: u16) -> Self {
        match bits {
            0b00 => Self::AfterOne,
            0b01 => Self::AfterTwo,
            0b10 => Self::AfterFour,
            _ => Self::Disabled,
        }
    }

    fn bits(self) -> u16 {
        self as u16
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DEFAULT_CONFIG;

    const ALL_MASKS: [u16; 9] = [
        Status::MASK,
        Mux::MASK,
        FullScale::MASK,
        Mode::MASK,
        DataRate::MASK,
        ComparatorMode::MASK,
        ComparatorPolarity::MASK,
        ComparatorLatching::MASK,
        ComparatorQueue::MASK,
    ];

    #[test]
    fn field_masks_cover_register_without_overlap() {
        let mut union = 0u16;
        for (i, &mask) in ALL_MASKS.iter().enumerate() {
            for &other in &ALL_MASKS[i + 1..] {
                assert_eq!(mask & other, 0, "masks {mask:#06x} and {other:#06x} overlap");
            }
            union |= mask;
        }
        assert_eq!(union, 0xFFFF);
    }

    #[test]
    fn insert_replaces_only_target_field() {
        for config in [0x0000u16, 0xFFFF, DEFAULT_CONFIG, 0x5A5A] {
            let updated = Mux::Ain0Ain3.insert(config);
            assert_eq!(updated & !Mux::MASK, config & !Mux::MASK);
            assert_eq!(Mux::from_config(updated), Mux::Ain0Ain3);

            let updated = DataRate::SPS860.insert(config);
            assert_eq!(updated & !DataRate::MASK, config & !DataRate::MASK);
            assert_eq!(DataRate::from_config(updated), DataRate::SPS860);

            let updated = ComparatorQueue::AfterTwo.insert(config);
            assert_eq!(updated & !ComparatorQueue::MASK, config & !ComparatorQueue::MASK);
            assert_eq!(ComparatorQueue::from_config(updated), ComparatorQueue::AfterTwo);
        }
    }

    #[test]
    fn default_config_decodes_to_power_on_settings() {
        assert_eq!(Status::from_config(DEFAULT_CONFIG), Status::Idle);
        assert_eq!(Mux::from_config(DEFAULT_CONFIG), Mux::Ain0Ain1);
        assert_eq!(FullScale::from_config(DEFAULT_CONFIG), FullScale::Fs2v048);
        assert_eq!(Mode::from_config(DEFAULT_CONFIG), Mode::SingleShot);
        assert_eq!(DataRate::from_config(DEFAULT_CONFIG), DataRate::SPS128);
        assert_eq!(
            ComparatorMode::from_config(DEFAULT_CONFIG),
            ComparatorMode::Traditional
        );
        assert_eq!(
            ComparatorPolarity::from_config(DEFAULT_CONFIG),
            ComparatorPolarity::ActiveLow
        );
        assert_eq!(
            ComparatorLatching::from_config(DEFAULT_CONFIG),
            ComparatorLatching::NonLatching
        );
        assert_eq!(
            ComparatorQueue::from_config(DEFAULT_CONFIG),
            ComparatorQueue::Disabled
        );
    }

    #[test]
    fn scale_bounds_match_datasheet() {
        let table = [
            (FullScale::Fs6v144, -6.144, 6.144),
            (FullScale::Fs4v096, -4.096, 4.096),
            (FullScale::Fs2v048, -2.048, 2.048),
            (FullScale::Fs1v024, -1.024, 1.024),
            (FullScale::Fs0v512, -0.512, 0.512),
            (FullScale::Fs0v256, -0.256, 0.256),
        ];
        for (fs, min, max) in table {
            assert_eq!(fs.min_max(), (min, max));
            assert_eq!(fs.width(), max - min);
            assert!(fs.width() > 0.0);
        }
    }

    #[test]
    fn reserved_full_scale_bits_decode_to_smallest_range() {
        assert_eq!(FullScale::from_bits(0b110), FullScale::Fs0v256);
        assert_eq!(FullScale::from_bits(0b111), FullScale::Fs0v256);
    }

    #[test]
    fn field_encoding_round_trips() {
        for mux in [
            Mux::Ain0Ain1,
            Mux::Ain0Ain3,
            Mux::Ain1Ain3,
            Mux::Ain2Ain3,
            Mux::Ain0Gnd,
            Mux::Ain1Gnd,
            Mux::Ain2Gnd,
            Mux::Ain3Gnd,
        ] {
            assert_eq!(Mux::from_bits(mux.bits()), mux);
        }
        for rate in [
            DataRate::SPS8,
            DataRate::SPS16,
            DataRate::SPS32,
            DataRate::SPS64,
            DataRate::SPS128,
            DataRate::SPS250,
            DataRate::SPS475,
            DataRate::SPS860,
        ] {
            assert_eq!(DataRate::from_bits(rate.bits()), rate);
        }
        for fs in [
            FullScale::Fs6v144,
            FullScale::Fs4v096,
            FullScale::Fs2v048,
            FullScale::Fs1v024,
            FullScale::Fs0v512,
            FullScale::Fs0v256,
        ] {
            assert_eq!(FullScale::from_bits(fs.bits()), fs);
        }
    }
}
