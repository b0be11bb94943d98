//! A single run of the utility: resolve, adjust, write, persist, notify.

use super::{
    adjustment::{Adjustment, Boundary, Operation},
    resolver::ValueResolver,
};
use crate::external::{
    brightness::{BrightnessController, BrightnessValue, ProtocolError},
    dependency_provider::DependencyProvider,
    notification::Notifier,
    state::{StateStore, StateStoreError},
};
use thiserror::Error;

/// What a successful invocation did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The display was set to the contained brightness
    Changed(BrightnessValue),
    /// The display was already at the boundary the operation moves to, it
    /// wasn't touched
    AtBoundary(Boundary),
}

impl Outcome {
    pub fn message(&self) -> String {
        match self {
            Outcome::Changed(value) => format!("Set to {}", value),
            Outcome::AtBoundary(boundary) => format!("Already at {} value", boundary),
        }
    }
}

#[derive(Debug, Error)]
pub enum InvocationError {
    #[error("couldn't set display brightness to {intended}: {source}")]
    HardwareWrite {
        intended: BrightnessValue,
        #[source]
        source: ProtocolError,
    },

    #[error(transparent)]
    Persist(StateStoreError),

    #[error("couldn't set display brightness to {intended} ({write_error}) and couldn't save it either ({persist_error})")]
    HardwareWriteAndPersist {
        intended: BrightnessValue,
        write_error: ProtocolError,
        persist_error: StateStoreError,
    },
}

impl InvocationError {
    pub fn message(&self) -> &'static str {
        match self {
            InvocationError::Persist(_) => "Failed to save value",
            InvocationError::HardwareWrite { .. }
            | InvocationError::HardwareWriteAndPersist { .. } => "Failed to set value",
        }
    }
}

#[derive(Debug)]
enum Stage {
    Resolving,
    Deciding(BrightnessValue),
    Writing {
        current: BrightnessValue,
        target: BrightnessValue,
    },
    Persisting {
        value: BrightnessValue,
        outcome: Outcome,
        write_error: Option<ProtocolError>,
    },
    Done(Result<Outcome, InvocationError>),
}

/// Drives one brightness change from start to finish.
///
/// The saved state is written at the end of every run, even when the display
/// was already at the requested boundary (there may be no saved state yet) and
/// even when setting the display failed. In the latter case the value the
/// display was supposed to get is saved and the run still fails.
pub struct Invocation<B: BrightnessController, S: StateStore, N: Notifier> {
    brightness_controller: B,
    store: S,
    notifier: N,
    adjustment: Adjustment,
    fallback: BrightnessValue,
}

impl<B: BrightnessController, S: StateStore, N: Notifier> Invocation<B, S, N> {
    pub fn new(
        provider: &DependencyProvider<B, S, N>,
        adjustment: Adjustment,
        fallback: BrightnessValue,
    ) -> Invocation<B, S, N>
    where
        B: Clone,
        S: Clone,
        N: Clone,
    {
        Invocation {
            brightness_controller: provider.get_brightness_controller(),
            store: provider.get_state_store(),
            notifier: provider.get_notifier(),
            adjustment,
            fallback,
        }
    }

    pub async fn run(&self, op: Operation) -> Result<Outcome, InvocationError> {
        let mut stage = Stage::Resolving;
        loop {
            log::trace!("{:?}", stage);
            stage = match stage {
                Stage::Resolving => {
                    let resolver =
                        ValueResolver::new(&self.store, &self.brightness_controller, self.fallback);
                    Stage::Deciding(resolver.resolve().await.value)
                }
                Stage::Deciding(current) => {
                    if op.is_noop_at(current) {
                        log::info!("Brightness is already at {}", current);
                        Stage::Persisting {
                            value: current,
                            outcome: Outcome::AtBoundary(op.boundary()),
                            write_error: None,
                        }
                    } else {
                        Stage::Writing {
                            current,
                            target: self.adjustment.apply(current, op),
                        }
                    }
                }
                Stage::Writing { current, target } => {
                    log::info!("Changing brightness from {} to {}", current, target);
                    let write_error = self.brightness_controller.set_brightness(target).await.err();
                    if let Some(e) = &write_error {
                        log::error!("Couldn't set brightness: {}", e);
                    }
                    Stage::Persisting {
                        value: target,
                        outcome: Outcome::Changed(target),
                        write_error,
                    }
                }
                Stage::Persisting {
                    value,
                    outcome,
                    write_error,
                } => {
                    let persisted = self.store.save(value).await;
                    Stage::Done(match (write_error, persisted) {
                        (None, Ok(())) => Ok(outcome),
                        (Some(source), Ok(())) => Err(InvocationError::HardwareWrite {
                            intended: value,
                            source,
                        }),
                        (None, Err(e)) => Err(InvocationError::Persist(e)),
                        (Some(write_error), Err(persist_error)) => {
                            Err(InvocationError::HardwareWriteAndPersist {
                                intended: value,
                                write_error,
                                persist_error,
                            })
                        }
                    })
                }
                Stage::Done(result) => {
                    let message = match &result {
                        Ok(outcome) => outcome.message(),
                        Err(e) => e.message().to_owned(),
                    };
                    if let Err(e) = self.notifier.notify(&message).await {
                        log::warn!("Couldn't show notification {:?}: {}", message, e);
                    }
                    return result;
                }
            }
        }
    }
}
