use std::fmt;

use log::{debug, info, warn};
use num_traits::FromPrimitive;

use crate::bus::RegisterBus;
use crate::delay::DelayMs;
use crate::registers::{
    ChipRegisters, Constants, OperationMode, PowerMode, RegisterPage, StatusRegisters, SysTrigger,
};
use crate::{Bno055, Error};

/// Time the chip needs to boot before a second ID read.
const BOOT_WAIT_MS: u32 = 1000;
/// Settling time after RST_SYS, raised from 10 ms for marginal supplies.
const RESET_SETTLE_MS: u32 = 30;
const RESET_POLL_INTERVAL_MS: u32 = 10;
const POST_RESET_MS: u32 = 50;
const POWER_MODE_MS: u32 = 10;
const TRIGGER_CLEAR_MS: u32 = 10;
const MODE_SWITCH_MS: u32 = 20;

/// What to do when the chip ID is still wrong after the boot retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChipIdPolicy {
    /// Log the mismatch and carry on with bring-up.
    #[default]
    Warn,
    /// Abort bring-up with `Error::InvalidChipId`.
    Strict,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BringUpConfig {
    pub chip_id_policy: ChipIdPolicy,
    /// Upper bound on chip ID reads while waiting for the chip to return from reset.
    pub reset_poll_attempts: u32,
}

impl Default for BringUpConfig {
    fn default() -> Self {
        BringUpConfig {
            chip_id_policy: ChipIdPolicy::Warn,
            reset_poll_attempts: 100,
        }
    }
}

impl<B> Bno055<B>
where
    B: RegisterBus,
    B::Error: fmt::Display,
{
    /// Resets the chip on `bus` and puts it into NDOF fusion mode.
    ///
    /// Writes are issued in a fixed order: reset, power mode normal, page 0,
    /// clear trigger, NDOF. Failed reads before the reset are only logged, a
    /// failed write aborts bring-up.
    pub fn bring_up<D: DelayMs>(
        bus: B,
        delay: &mut D,
        config: &BringUpConfig,
    ) -> Result<Self, Error<B::Error>> {
        let mut bno = Bno055 { bus };

        bno.check_chip_id(delay, config.chip_id_policy)?;
        bno.log_operation_mode();

        debug!("Resetting BNO055");
        bno.write(StatusRegisters::SysTrigger as u8, SysTrigger::RstSys as u8)?;
        delay.delay_ms(RESET_SETTLE_MS);
        bno.wait_for_chip_id(delay, config.reset_poll_attempts)?;
        delay.delay_ms(POST_RESET_MS);

        debug!("Setting normal power mode");
        bno.write(StatusRegisters::PwrMode as u8, PowerMode::Normal as u8)?;
        delay.delay_ms(POWER_MODE_MS);

        bno.write(ChipRegisters::PageId as u8, RegisterPage::Page0 as u8)?;
        bno.write(StatusRegisters::SysTrigger as u8, SysTrigger::Clear as u8)?;
        delay.delay_ms(TRIGGER_CLEAR_MS);

        debug!("Entering NDOF fusion mode");
        bno.write(StatusRegisters::OprMode as u8, OperationMode::Ndof as u8)?;
        delay.delay_ms(MODE_SWITCH_MS);

        info!("BNO055 initialized in NDOF mode");
        Ok(bno)
    }

    fn check_chip_id<D: DelayMs>(
        &mut self,
        delay: &mut D,
        policy: ChipIdPolicy,
    ) -> Result<(), Error<B::Error>> {
        let expected = Constants::ChipId as u8;
        if matches!(self.read(ChipRegisters::ChipId as u8), Ok(id) if id == expected) {
            debug!("BNO055 chip ID verified: {:#04x}", expected);
            return Ok(());
        }

        // Hold on for boot
        delay.delay_ms(BOOT_WAIT_MS);
        let failure = match self.read(ChipRegisters::ChipId as u8) {
            Ok(id) if id == expected => return Ok(()),
            Ok(id) => Error::InvalidChipId(id),
            Err(err) => err,
        };

        match policy {
            ChipIdPolicy::Strict => Err(failure),
            ChipIdPolicy::Warn => {
                warn!("Failed to read sensor ID: {}", failure);
                Ok(())
            }
        }
    }

    fn log_operation_mode(&mut self) {
        match self.read(StatusRegisters::OprMode as u8) {
            Ok(raw) => match OperationMode::from_u8(raw) {
                Some(mode) => info!("Current mode: {:?}", mode),
                None => info!("Current mode: unknown ({:#04x})", raw),
            },
            Err(err) => warn!("Failed to read operation mode: {}", err),
        }
    }

    fn wait_for_chip_id<D: DelayMs>(
        &mut self,
        delay: &mut D,
        max_attempts: u32,
    ) -> Result<(), Error<B::Error>> {
        let expected = Constants::ChipId as u8;
        for attempt in 1..=max_attempts {
            match self.read(ChipRegisters::ChipId as u8) {
                Ok(id) if id == expected => {
                    debug!("BNO055 back after reset ({} reads)", attempt);
                    return Ok(());
                }
                Ok(id) => debug!("Chip ID {:#04x} after reset, waiting", id),
                Err(err) => debug!("Chip not answering after reset: {}", err),
            }
            if attempt < max_attempts {
                delay.delay_ms(RESET_POLL_INTERVAL_MS);
            }
        }
        Err(Error::ResetTimeout {
            attempts: max_attempts,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{MockBus, RecordingDelay};

    const CHIP_ID: u8 = 0x00;
    const SYS_TRIGGER: u8 = 0x3F;

    fn healthy_bus() -> MockBus {
        let mut bus = MockBus::new();
        bus.write_regs(CHIP_ID, &[0xA0]);
        bus
    }

    #[test]
    fn healthy_chip_delays() {
        let mut delay = RecordingDelay::new();
        Bno055::bring_up(healthy_bus(), &mut delay, &BringUpConfig::default()).unwrap();
        assert_eq!(delay.calls, vec![30, 50, 10, 10, 20]);
    }

    #[test]
    fn mismatch_waits_for_boot_and_rereads_once() {
        let mut bus = healthy_bus();
        bus.queue_read(CHIP_ID, 0x00);
        let mut delay = RecordingDelay::new();

        let bno = Bno055::bring_up(bus, &mut delay, &BringUpConfig::default()).unwrap();

        assert_eq!(delay.calls[0], BOOT_WAIT_MS);
        // mismatch, retry, then the post-reset poll
        assert_eq!(bno.bus().reads_of(CHIP_ID), 3);
    }

    #[test]
    fn persistent_mismatch_is_tolerated_by_default() {
        let mut bus = healthy_bus();
        bus.queue_read(CHIP_ID, 0x42);
        bus.queue_read(CHIP_ID, 0x42);
        let mut delay = RecordingDelay::new();

        let bno = Bno055::bring_up(bus, &mut delay, &BringUpConfig::default()).unwrap();
        assert_eq!(
            bno.bus().writes().last(),
            Some(&(0x3D, OperationMode::Ndof as u8))
        );
    }

    #[test]
    fn strict_policy_rejects_wrong_chip() {
        let mut bus = healthy_bus();
        bus.queue_read(CHIP_ID, 0x42);
        bus.queue_read(CHIP_ID, 0x42);
        let config = BringUpConfig {
            chip_id_policy: ChipIdPolicy::Strict,
            ..BringUpConfig::default()
        };

        match Bno055::bring_up(bus, &mut RecordingDelay::new(), &config) {
            Err(Error::InvalidChipId(0x42)) => {}
            Err(other) => panic!("unexpected error: {}", other),
            Ok(_) => panic!("bring-up should have failed"),
        }
    }

    #[test]
    fn strict_policy_reports_read_failure() {
        let mut bus = healthy_bus();
        bus.queue_read_error(CHIP_ID);
        bus.queue_read_error(CHIP_ID);
        let config = BringUpConfig {
            chip_id_policy: ChipIdPolicy::Strict,
            ..BringUpConfig::default()
        };

        assert!(matches!(
            Bno055::bring_up(bus, &mut RecordingDelay::new(), &config),
            Err(Error::I2c(_))
        ));
    }

    #[test]
    fn poll_budget_exhaustion_times_out() {
        let mut bus = MockBus::new();
        bus.write_regs(CHIP_ID, &[0x00]);
        let config = BringUpConfig {
            reset_poll_attempts: 5,
            ..BringUpConfig::default()
        };
        let mut delay = RecordingDelay::new();

        match Bno055::bring_up(bus, &mut delay, &config) {
            Err(Error::ResetTimeout { attempts: 5 }) => {}
            Err(other) => panic!("unexpected error: {}", other),
            Ok(_) => panic!("bring-up should have timed out"),
        }
        // boot wait, settle, then 4 poll intervals between 5 reads
        assert_eq!(delay.calls, vec![1000, 30, 10, 10, 10, 10]);
    }

    #[test]
    fn failed_reset_write_aborts() {
        let mut bus = healthy_bus();
        bus.fail_writes_to(SYS_TRIGGER);

        assert!(matches!(
            Bno055::bring_up(bus, &mut RecordingDelay::new(), &BringUpConfig::default()),
            Err(Error::I2c(_))
        ));
    }
}
