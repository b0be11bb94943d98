use crate::external::{
    brightness::{BrightnessController, BrightnessValue},
    state::StateStore,
};
use std::fmt;

/// Where the current brightness came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueSource {
    Cache,
    Hardware,
    Fallback,
}

impl fmt::Display for ValueSource {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ValueSource::Cache => write!(f, "saved state"),
            ValueSource::Hardware => write!(f, "display"),
            ValueSource::Fallback => write!(f, "fallback"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub value: BrightnessValue,
    pub source: ValueSource,
}

/// Figures out the display's current brightness.
///
/// The saved state is preferred since querying the display is slow and needs
/// privileges. When nothing usable is saved the display is asked, and if that
/// fails too, `fallback` is assumed. Resolution never fails.
pub struct ValueResolver<'a, B: BrightnessController, S: StateStore> {
    store: &'a S,
    brightness_controller: &'a B,
    fallback: BrightnessValue,
}

impl<'a, B: BrightnessController, S: StateStore> ValueResolver<'a, B, S> {
    pub fn new(
        store: &'a S,
        brightness_controller: &'a B,
        fallback: BrightnessValue,
    ) -> ValueResolver<'a, B, S> {
        ValueResolver {
            store,
            brightness_controller,
            fallback,
        }
    }

    pub async fn resolve(&self) -> Resolution {
        let resolution = match self.store.load().await {
            Ok(value) => Resolution {
                value,
                source: ValueSource::Cache,
            },
            Err(e) => {
                log::debug!("Not using saved brightness: {}", e);
                match self.brightness_controller.get_brightness().await {
                    Ok(value) => Resolution {
                        value,
                        source: ValueSource::Hardware,
                    },
                    Err(e) => {
                        log::warn!(
                            "Couldn't query display brightness, assuming {}: {}",
                            self.fallback,
                            e
                        );
                        Resolution {
                            value: self.fallback,
                            source: ValueSource::Fallback,
                        }
                    }
                }
            }
        };
        log::debug!(
            "Current brightness is {} (from {})",
            resolution.value,
            resolution.source
        );
        resolution
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::external::{
        brightness::mock::MockBrightnessController, state::mock::MockStateStore,
    };

    fn value(v: u8) -> BrightnessValue {
        BrightnessValue::new(v).unwrap()
    }

    #[tokio::test]
    async fn test_cache_takes_priority() {
        let store = MockStateStore::with_value(value(50));
        let display = MockBrightnessController::new(value(20));
        let resolution = ValueResolver::new(&store, &display, BrightnessValue::MAX)
            .resolve()
            .await;
        assert_eq!(resolution.value, value(50));
        assert_eq!(resolution.source, ValueSource::Cache);
        assert_eq!(display.read_count(), 0);
    }

    #[tokio::test]
    async fn test_hardware_when_cache_missing() {
        let store = MockStateStore::empty();
        let display = MockBrightnessController::new(value(20));
        let resolution = ValueResolver::new(&store, &display, BrightnessValue::MAX)
            .resolve()
            .await;
        assert_eq!(resolution.value, value(20));
        assert_eq!(resolution.source, ValueSource::Hardware);
        // Resolving doesn't write anything back
        assert_eq!(store.contents(), None);
    }

    #[tokio::test]
    async fn test_hardware_when_cache_corrupt() {
        let store = MockStateStore::with_contents("1000");
        let display = MockBrightnessController::new(value(20));
        let resolution = ValueResolver::new(&store, &display, BrightnessValue::MAX)
            .resolve()
            .await;
        assert_eq!(resolution.value, value(20));
        assert_eq!(resolution.source, ValueSource::Hardware);
    }

    #[tokio::test]
    async fn test_fallback() {
        for store in [MockStateStore::empty(), MockStateStore::with_contents("??")] {
            let display = MockBrightnessController::new(value(20));
            display.set_failure_mode(true);
            let resolution = ValueResolver::new(&store, &display, BrightnessValue::MAX)
                .resolve()
                .await;
            assert_eq!(resolution.value, BrightnessValue::MAX);
            assert_eq!(resolution.source, ValueSource::Fallback);
            assert_eq!(display.read_count(), 1);
        }
    }

    #[tokio::test]
    async fn test_custom_fallback() {
        let store = MockStateStore::empty();
        let display = MockBrightnessController::new(value(20));
        display.set_failure_mode(true);
        let resolution = ValueResolver::new(&store, &display, value(40))
            .resolve()
            .await;
        assert_eq!(resolution.value, value(40));
    }
}
