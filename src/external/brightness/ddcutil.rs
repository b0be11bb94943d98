use super::{BrightnessController, BrightnessValue, ProtocolError};
use crate::external::command::CommandStrings;
use async_trait::async_trait;

/// MCCS feature code of the display's luminance control.
const BRIGHTNESS_VCP_CODE: &str = "10";

/// Label of the brightness feature in `getvcp` output.
const BRIGHTNESS_LABEL: &str = "Brightness";

/// A [BrightnessController] which talks to an external display over DDC/CI
/// by running `ddcutil`.
///
/// ddcutil needs access to the `/dev/i2c-*` devices, which usually means
/// running it as root, so the program is invoked through a configurable
/// prefix (`sudo ddcutil` by default).
#[derive(Debug, Clone)]
pub struct DdcutilBrightnessController {
    ddcutil: CommandStrings,
    display: u32,
}

impl DdcutilBrightnessController {
    /// Create a new controller for the display with the given ddcutil
    /// display number (1-based).
    pub fn new(ddcutil: CommandStrings, display: u32) -> DdcutilBrightnessController {
        DdcutilBrightnessController { ddcutil, display }
    }

    fn vcp_args(&self, subcommand: &str) -> Vec<String> {
        vec![
            "--display".to_owned(),
            self.display.to_string(),
            subcommand.to_owned(),
            BRIGHTNESS_VCP_CODE.to_owned(),
        ]
    }
}

#[async_trait]
impl BrightnessController for DdcutilBrightnessController {
    async fn get_brightness(&self) -> Result<BrightnessValue, ProtocolError> {
        let output = self.ddcutil.run(&self.vcp_args("getvcp")).await?;
        parse_current_value(&output, BRIGHTNESS_LABEL)
    }

    async fn set_brightness(&self, value: BrightnessValue) -> Result<(), ProtocolError> {
        let mut args = self.vcp_args("setvcp");
        args.push(value.to_string());
        self.ddcutil.run(&args).await?;
        Ok(())
    }
}

/// Extract the current value of the feature labeled `label` from ddcutil's
/// `getvcp` output, which looks like
///
/// ```text
/// VCP code 0x10 (Brightness                    ): current value =    67, max value =   100
/// ```
///
/// The value is the first token after the first `=` following the label,
/// on the label's line.
pub fn parse_current_value(output: &str, label: &str) -> Result<BrightnessValue, ProtocolError> {
    let start = output
        .find(label)
        .ok_or_else(|| ProtocolError::MissingField(label.to_owned()))?;
    let line = output[start..].lines().next().unwrap_or_default();
    let invalid = || ProtocolError::InvalidValue {
        line: line.to_owned(),
    };

    let (_, after_equals) = line.split_once('=').ok_or_else(invalid)?;
    let digits: String = after_equals
        .trim_start()
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();
    let raw: u8 = digits.parse().map_err(|_| invalid())?;
    BrightnessValue::new(raw).map_err(|_| invalid())
}
