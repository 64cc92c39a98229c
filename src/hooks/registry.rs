//! Hook Registry
//!
//! Contains:
//! - `Hook` trait - for implementing hooks
//! - `HookMatcher` - matches an event subject by regex pattern
//! - `LifecycleHooks` - stores and runs hooks

use std::collections::HashMap;
use std::sync::Arc;

use regex::Regex;

use super::types::{LifecycleContext, LifecycleEvent};

/// Trait for hook implementations
///
/// Hooks are synchronous. They run inside the turn, before the reply is
/// built, so they should stay cheap.
pub trait Hook: Send + Sync {
    /// Execute the hook with the given context
    fn call(&self, ctx: &mut LifecycleContext<'_>);
}

/// Implement Hook for closures
impl<F> Hook for F
where
    F: for<'a> Fn(&mut LifecycleContext<'a>) + Send + Sync,
{
    fn call(&self, ctx: &mut LifecycleContext<'_>) {
        (self)(ctx)
    }
}

/// Type alias for stored hooks
pub type ArcHook = Arc<dyn Hook>;

/// Matches an event subject by pattern and executes a hook
pub struct HookMatcher {
    /// Regex pattern to match the subject (None = match all)
    pattern: Option<Regex>,

    /// The hook to execute
    hook: ArcHook,
}

impl HookMatcher {
    /// Create a matcher that matches every subject
    pub fn new<H: Hook + 'static>(hook: H) -> Self {
        Self {
            pattern: None,
            hook: Arc::new(hook),
        }
    }

    /// Create a matcher with a regex pattern
    ///
    /// Pattern examples for SessionEnded:
    /// - `"ERROR"` - only sessions closed by a platform error
    /// - `"USER_INITIATED|EXCEEDED_MAX_REPROMPTS"`
    pub fn with_pattern<H: Hook + 'static>(pattern: &str, hook: H) -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: Some(Regex::new(pattern)?),
            hook: Arc::new(hook),
        })
    }

    /// Check if this matcher applies to a subject
    pub fn matches(&self, subject: &str) -> bool {
        match &self.pattern {
            Some(regex) => regex.is_match(subject),
            None => true,
        }
    }

    /// Run the hook with the given context
    pub fn run(&self, ctx: &mut LifecycleContext<'_>) {
        self.hook.call(ctx)
    }
}

impl std::fmt::Debug for HookMatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HookMatcher")
            .field("pattern", &self.pattern.as_ref().map(|r| r.as_str()))
            .finish()
    }
}

/// Registry of session lifecycle hooks
///
/// Built once at start and shared read-only by every turn.
///
/// # Example
///
/// ```ignore
/// let mut hooks = LifecycleHooks::new();
///
/// hooks.add(LifecycleEvent::SessionStarted, |ctx| {
///     ctx.set_attribute("startedAt", json!(ctx.request.timestamp));
/// });
///
/// hooks.add_with_pattern(LifecycleEvent::SessionEnded, "ERROR", |ctx| {
///     tracing::warn!("Session {} closed by platform error", ctx.session_id());
/// })?;
/// ```
#[derive(Default)]
pub struct LifecycleHooks {
    hooks: HashMap<LifecycleEvent, Vec<HookMatcher>>,
}

impl LifecycleHooks {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a hook that runs on every occurrence of `event`
    pub fn add<H: Hook + 'static>(&mut self, event: LifecycleEvent, hook: H) -> &mut Self {
        self.hooks
            .entry(event)
            .or_default()
            .push(HookMatcher::new(hook));
        self
    }

    /// Add a hook that runs only when the event subject matches `pattern`
    pub fn add_with_pattern<H: Hook + 'static>(
        &mut self,
        event: LifecycleEvent,
        pattern: &str,
        hook: H,
    ) -> Result<&mut Self, regex::Error> {
        self.hooks
            .entry(event)
            .or_default()
            .push(HookMatcher::with_pattern(pattern, hook)?);
        Ok(self)
    }

    /// Check if there are any hooks for an event
    pub fn has_hooks(&self, event: LifecycleEvent) -> bool {
        self.hooks
            .get(&event)
            .map(|v| !v.is_empty())
            .unwrap_or(false)
    }

    /// Get the number of hooks for an event
    pub fn hook_count(&self, event: LifecycleEvent) -> usize {
        self.hooks.get(&event).map(|v| v.len()).unwrap_or(0)
    }

    /// Run all matching hooks for the context's event, in registration order
    pub fn run(&self, ctx: &mut LifecycleContext<'_>) {
        tracing::debug!(
            "{} requestId={}, sessionId={}",
            ctx.event,
            ctx.request_id(),
            ctx.session_id()
        );

        let matchers = match self.hooks.get(&ctx.event) {
            Some(matchers) => matchers,
            None => return,
        };

        let subject = ctx.subject();
        for matcher in matchers.iter().filter(|m| m.matches(&subject)) {
            matcher.run(ctx);
        }
    }
}

impl std::fmt::Debug for LifecycleHooks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut map = f.debug_map();
        for (event, matchers) in &self.hooks {
            map.entry(event, &matchers.len());
        }
        map.finish()
    }
}
