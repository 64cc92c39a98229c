//! The "Docs" health-record skill
//!
//! | Intent                 | Handler                 | Needs account |
//! |------------------------|-------------------------|---------------|
//! | `DataRecordIntent`     | `DataRecordHandler`     | yes           |
//! | `DataRetrieveIntent`   | `DataRetrieveHandler`   | yes           |
//! | `DoctorsEmailIntent`   | `DoctorsEmailHandler`   | yes           |
//! | `UpdateDocEmailIntent` | `UpdateDocEmailHandler` | yes           |
//! | `AMAZON.StopIntent`    | `ControlHandler::stop`  | no            |
//! | `AMAZON.CancelIntent`  | `ControlHandler::cancel`| no            |
//! | `AMAZON.HelpIntent`    | `ControlHandler::help`  | no            |
//!
//! Launch requests go to `LaunchHandler`.

mod account;
mod control;
mod doctor;
mod intent;
pub mod messages;
mod records;

#[cfg(test)]
pub(crate) mod fakes;

pub use account::is_email;
pub use control::{ControlHandler, LaunchHandler};
pub use doctor::{DoctorsEmailHandler, UpdateDocEmailHandler};
pub use intent::BuiltinIntent;
pub use records::{DataRecordHandler, DataRetrieveHandler, PARAMETER_SLOT, UNIT_SLOT, VALUE_SLOT};

use crate::core::SkillConfig;
use crate::hooks::{LifecycleContext, LifecycleEvent, LifecycleHooks};
use crate::intents::IntentRegistry;
use crate::skill::{Services, Skill};

/// Registry with a handler for every `BuiltinIntent`
pub fn intent_registry() -> IntentRegistry {
    let mut registry = IntentRegistry::new();
    registry
        .register(DataRecordHandler)
        .register(DataRetrieveHandler)
        .register(DoctorsEmailHandler)
        .register(UpdateDocEmailHandler)
        .register(ControlHandler::stop())
        .register(ControlHandler::cancel())
        .register(ControlHandler::help());
    registry
}

/// Session lifecycle logging
pub fn lifecycle_hooks() -> LifecycleHooks {
    let mut hooks = LifecycleHooks::new();
    hooks
        .add(LifecycleEvent::SessionStarted, |ctx: &mut LifecycleContext| {
            tracing::info!(
                "onSessionStarted requestId={} sessionId={}",
                ctx.request_id(),
                ctx.session_id()
            );
        })
        .add(LifecycleEvent::SessionEnded, |ctx: &mut LifecycleContext| {
            tracing::info!(
                "onSessionEnded requestId={} sessionId={} reason={}",
                ctx.request_id(),
                ctx.session_id(),
                ctx.subject()
            );
        });
    hooks
}

/// The complete skill
pub fn build_skill(config: SkillConfig, services: Services) -> Skill {
    Skill::new(config, services, LaunchHandler, intent_registry()).with_hooks(lifecycle_hooks())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_covers_builtin_intents() {
        let registry = intent_registry();
        assert_eq!(registry.len(), BuiltinIntent::ALL.len());
        for intent in BuiltinIntent::ALL {
            assert!(registry.contains(intent.as_str()), "missing {}", intent);
        }
    }

    #[test]
    fn test_hooks_cover_both_events() {
        let hooks = lifecycle_hooks();
        assert_eq!(hooks.hook_count(LifecycleEvent::SessionStarted), 1);
        assert_eq!(hooks.hook_count(LifecycleEvent::SessionEnded), 1);
    }
}
