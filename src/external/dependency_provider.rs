use super::{
    brightness::{
        ddcutil::DdcutilBrightnessController, mock::MockBrightnessController,
        BrightnessController, BrightnessValue,
    },
    notification::{mock::MockNotifier, notify_send::CommandNotifier, Notifier},
    state::{file::FileStateStore, mock::MockStateStore, StateStore},
};
use crate::config::Config;

/// Hands out the collaborators an invocation works with.
pub struct DependencyProvider<B: BrightnessController, S: StateStore, N: Notifier> {
    brightness_controller: B,
    state_store: S,
    notifier: N,
}

impl<B, S, N> DependencyProvider<B, S, N>
where
    B: BrightnessController + Clone,
    S: StateStore + Clone,
    N: Notifier + Clone,
{
    pub fn new(brightness_controller: B, state_store: S, notifier: N) -> DependencyProvider<B, S, N> {
        DependencyProvider {
            brightness_controller,
            state_store,
            notifier,
        }
    }

    pub fn get_brightness_controller(&self) -> B {
        self.brightness_controller.clone()
    }

    pub fn get_state_store(&self) -> S {
        self.state_store.clone()
    }

    pub fn get_notifier(&self) -> N {
        self.notifier.clone()
    }
}

impl DependencyProvider<DdcutilBrightnessController, FileStateStore, CommandNotifier> {
    pub fn make_system(config: &Config) -> Self {
        let notifier = if config.notification.enabled {
            CommandNotifier::new(config.notification.command.clone())
        } else {
            CommandNotifier::disabled()
        };
        DependencyProvider::new(
            DdcutilBrightnessController::new(config.display.command.clone(), config.display.number),
            FileStateStore::new(&config.state_file),
            notifier,
        )
    }
}

impl DependencyProvider<MockBrightnessController, MockStateStore, MockNotifier> {
    pub fn make_mock() -> Self {
        DependencyProvider::new(
            MockBrightnessController::new(BrightnessValue::clamped(50)),
            MockStateStore::empty(),
            MockNotifier::new(),
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::external::state::StateStoreError;

    #[tokio::test]
    async fn test_mock() {
        let provider = DependencyProvider::make_mock();
        assert_eq!(
            provider
                .get_brightness_controller()
                .get_brightness()
                .await
                .unwrap(),
            BrightnessValue::new(50).unwrap()
        );
        assert!(matches!(
            provider.get_state_store().load().await,
            Err(StateStoreError::NotFound(_))
        ));
        provider.get_notifier().notify("hello").await.unwrap();
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let provider = DependencyProvider::make_mock();
        provider
            .get_state_store()
            .save(BrightnessValue::MIN)
            .await
            .unwrap();
        assert_eq!(
            provider.get_state_store().load().await.unwrap(),
            BrightnessValue::MIN
        );
    }

    #[test]
    fn test_system_from_default_config() {
        let provider = DependencyProvider::make_system(&Config::default());
        assert_eq!(
            provider.get_state_store().path(),
            std::path::Path::new("/tmp/brightness.value")
        );
    }
}
