//! # Texas Instruments ADS111x Driver
//!
//! Driver for the ADS1113, ADS1114 and ADS1115 16-bit I2C ADCs.

#![cfg_attr(not(test), no_std)]

use crate::registers::ConfigField;
use byteorder::{BigEndian, ByteOrder};
use core::result::Result;
use embedded_hal_async::i2c;

pub use crate::registers::{
    ComparatorLatching, ComparatorMode, ComparatorPolarity, ComparatorQueue, DataRate, FullScale,
    Mode, Mux, Register, Status,
};

mod registers;

/// Number of distinct output codes of the 16-bit converter.
pub const RESOLUTION: u32 = 1 << 16;

/// Power-on reset value of the config register: idle, AIN0/AIN1,
/// +/- 2.048 V, single-shot, 128 SPS, traditional comparator,
/// active low, non-latching, comparator disabled.
pub const DEFAULT_CONFIG: u16 = 0x8583;

/// I2C device address, selected by strapping the ADDR pin.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Address {
    /// ADDR tied to GND, 0x48 (default).
    Gnd = 0x48,
    /// ADDR tied to VDD, 0x49.
    Vdd = 0x49,
    /// ADDR tied to SDA, 0x4A.
    Sda = 0x4A,
    /// ADDR tied to SCL, 0x4B.
    Scl = 0x4B,
}

impl Default for Address {
    fn default() -> Self {
        Address::Gnd
    }
}

/// Errors that can occur when using the ADS111x driver.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<I2cErr> {
    I2c(I2cErr),
}

/// ADS111x async driver.
///
/// The driver keeps no copy of the device config; every accessor reads
/// the config register from the device, so external writes on the same
/// bus are always observed. A field setter is a read-modify-write pair
/// of bus transactions and is not atomic; callers sharing a device
/// must serialize access themselves.
pub struct Ads111x<D>
where
    D: i2c::I2c,
{
    i2c_dev: D,
    address: Address,
}

impl<D, I2cErr> Ads111x<D>
where
    D: i2c::I2c<Error = I2cErr>,
{
    /// Creates a new ADS111x driver instance.
    ///
    /// # Arguments
    /// i2c_dev: The I2C device.
    /// address: The device address, per the ADDR pin strap.
    ///
    pub fn new(i2c_dev: D, address: Address) -> Self {
        Self { i2c_dev, address }
    }

    /// Releases the underlying I2C device.
    pub fn release(self) -> D {
        self.i2c_dev
    }

    /// Reads the config register.
    pub async fn read_config(&mut self) -> Result<u16, Error<I2cErr>> {
        self.read_register(Register::Config).await
    }

    /// Writes a new value to the config register.
    pub async fn write_config(&mut self, config: u16) -> Result<(), Error<I2cErr>> {
        self.write_register(Register::Config, config).await
    }

    /// Returns the operational status (busy or idle).
    pub async fn status(&mut self) -> Result<Status, Error<I2cErr>> {
        self.config_field().await
    }

    /// Requests a single conversion while in single-shot mode.
    pub async fn start_conversion(&mut self) -> Result<(), Error<I2cErr>> {
        let config = self.read_config().await?;
        self.write_config(config | Status::MASK).await
    }

    /// Returns the selected input pair.
    pub async fn input(&mut self) -> Result<Mux, Error<I2cErr>> {
        self.config_field().await
    }

    /// Returns the conversion mode config setting.
    pub async fn mode(&mut self) -> Result<Mode, Error<I2cErr>> {
        self.config_field().await
    }

    /// Sets the conversion mode (continuous or single-shot).
    pub async fn set_mode(&mut self, mode: Mode) -> Result<(), Error<I2cErr>> {
        self.set_config_field(mode).await
    }

    /// Returns the full-scale range config setting.
    pub async fn full_scale(&mut self) -> Result<FullScale, Error<I2cErr>> {
        self.config_field().await
    }

    /// Sets the full-scale input range.
    pub async fn set_full_scale(&mut self, scale: FullScale) -> Result<(), Error<I2cErr>> {
        self.set_config_field(scale).await
    }

    /// Returns the data rate config setting.
    pub async fn data_rate(&mut self) -> Result<DataRate, Error<I2cErr>> {
        self.config_field().await
    }

    // Set the ADC sample rate.
    pub async fn set_data_rate(&mut self, rate: DataRate) -> Result<(), Error<I2cErr>> {
        self.set_config_field(rate).await
    }

    /// Returns the comparator mode config setting.
    pub async fn comparator_mode(&mut self) -> Result<ComparatorMode, Error<I2cErr>> {
        self.config_field().await
    }

    /// Sets the comparator mode (traditional or window).
    pub async fn set_comparator_mode(&mut self, mode: ComparatorMode) -> Result<(), Error<I2cErr>> {
        self.set_config_field(mode).await
    }

    /// Returns the ALERT/RDY polarity config setting.
    pub async fn comparator_polarity(&mut self) -> Result<ComparatorPolarity, Error<I2cErr>> {
        self.config_field().await
    }

    /// Sets the ALERT/RDY pin polarity.
    pub async fn set_comparator_polarity(
        &mut self,
        polarity: ComparatorPolarity,
    ) -> Result<(), Error<I2cErr>> {
        self.set_config_field(polarity).await
    }

    /// Returns the comparator latching config setting.
    pub async fn comparator_latching(&mut self) -> Result<ComparatorLatching, Error<I2cErr>> {
        self.config_field().await
    }

    /// Sets whether the comparator latches until conversion data is read.
    pub async fn set_comparator_latching(
        &mut self,
        latching: ComparatorLatching,
    ) -> Result<(), Error<I2cErr>> {
        self.set_config_field(latching).await
    }

    /// Returns the comparator queue config setting.
    pub async fn comparator_queue(&mut self) -> Result<ComparatorQueue, Error<I2cErr>> {
        self.config_field().await
    }

    /// Sets the comparator queue length, or disables the comparator.
    pub async fn set_comparator_queue(
        &mut self,
        queue: ComparatorQueue,
    ) -> Result<(), Error<I2cErr>> {
        self.set_config_field(queue).await
    }

    /// Reads the conversion register as a two's complement count.
    ///
    /// The count is meaningless without the full-scale range that was
    /// in effect when the device sampled it.
    pub async fn read_conversion(&mut self) -> Result<i16, Error<I2cErr>> {
        Ok(self.read_register(Register::Conversion).await? as i16)
    }

    /// Reads the raw conversion count for the given input pair,
    /// selecting it first if it is not already selected.
    ///
    /// Selecting a new input rewrites the shared config register; the
    /// selection stays in effect for every subsequent conversion until
    /// it is changed again.
    pub async fn read_channel(&mut self, input: Mux) -> Result<i16, Error<I2cErr>> {
        self.select_input(input).await?;
        self.read_conversion().await
    }

    /// Reads the voltage on the given input pair.
    ///
    /// The count is scaled by the full-scale range observed just before
    /// the conversion read. If another bus master changes the range
    /// between the config read and the conversion read, the reported
    /// voltage uses the range seen at the config read.
    pub async fn read_volts(&mut self, input: Mux) -> Result<f32, Error<I2cErr>> {
        let config = self.select_input(input).await?;
        let count = self.read_conversion().await?;

        let scale = FullScale::from_config(config);
        let volts_per_count = scale.width() / RESOLUTION as f32;

        Ok(f32::from(count) * volts_per_count)
    }

    /// Ensures `input` is selected, writing the config register only
    /// when the selection differs. Returns the config in effect after
    /// selection.
    async fn select_input(&mut self, input: Mux) -> Result<u16, Error<I2cErr>> {
        let config = self.read_config().await?;
        if Mux::from_config(config) == input {
            return Ok(config);
        }

        let updated = input.insert(config);
        self.write_config(updated).await?;

        Ok(updated)
    }

    /// Reads and decodes a single config field.
    async fn config_field<F: ConfigField>(&mut self) -> Result<F, Error<I2cErr>> {
        Ok(F::from_config(self.read_config().await?))
    }

    /// Rewrites a single config field, preserving all other fields.
    async fn set_config_field<F: ConfigField>(&mut self, field: F) -> Result<(), Error<I2cErr>> {
        let config = self.read_config().await?;
        self.write_config(field.insert(config)).await
    }

    /// Reads a 16-bit register, big-endian on the wire.
    async fn read_register(&mut self, reg: Register) -> Result<u16, Error<I2cErr>> {
        let mut buf = [0u8; 2];
        self.i2c_dev
            .write_read(self.address as u8, &[reg as u8], &mut buf)
            .await
            .map_err(Error::I2c)?;
        Ok(BigEndian::read_u16(&buf))
    }

    /// Writes a 16-bit register, big-endian on the wire.
    async fn write_register(&mut self, reg: Register, value: u16) -> Result<(), Error<I2cErr>> {
        let mut buf = [reg as u8, 0, 0];
        BigEndian::write_u16(&mut buf[1..], value);
        self.i2c_dev
            .write(self.address as u8, &buf)
            .await
            .map_err(Error::I2c)
    }
}
