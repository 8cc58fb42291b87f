/// Attribute mirroring the set of upgraded component names.
pub const DEFAULT_MARKER_ATTRIBUTE: &str = "data-upgraded";

/// Event fired on an element after a component was upgraded on it.
pub const DEFAULT_UPGRADED_EVENT: &str = "componentupgraded";

/// Event fired on an element after a component was downgraded from it.
pub const DEFAULT_DOWNGRADED_EVENT: &str = "componentdowngraded";

/// Class added to the document root by [`ComponentHandler::load`](crate::ComponentHandler::load).
pub const DEFAULT_READY_CLASS: &str = "hatch-js";

/// Configuration for a [`ComponentHandler`](crate::ComponentHandler).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerConfig {
    /// Attribute the marker set is mirrored to.
    pub marker_attribute: String,
    /// Name of the upgrade event.
    pub upgraded_event: String,
    /// Name of the downgrade event.
    pub downgraded_event: String,
    /// Class added to the root element on load.
    pub ready_class: String,
    /// Mirror the marker set to `marker_attribute`. When off, the side table
    /// is the only record and pre-existing attributes are still honored.
    pub mirror_marker_attribute: bool,
    /// Fire DOM events on upgrade/downgrade. Observers run regardless.
    pub dispatch_dom_events: bool,
}

impl Default for HandlerConfig {
    fn default() -> Self {
        Self {
            marker_attribute: DEFAULT_MARKER_ATTRIBUTE.to_string(),
            upgraded_event: DEFAULT_UPGRADED_EVENT.to_string(),
            downgraded_event: DEFAULT_DOWNGRADED_EVENT.to_string(),
            ready_class: DEFAULT_READY_CLASS.to_string(),
            mirror_marker_attribute: true,
            dispatch_dom_events: true,
        }
    }
}

impl HandlerConfig {
    pub fn with_marker_attribute(mut self, attribute: impl Into<String>) -> Self {
        self.marker_attribute = attribute.into();
        self
    }

    pub fn with_event_names(mut self, upgraded: impl Into<String>, downgraded: impl Into<String>) -> Self {
        self.upgraded_event = upgraded.into();
        self.downgraded_event = downgraded.into();
        self
    }

    pub fn with_ready_class(mut self, class: impl Into<String>) -> Self {
        self.ready_class = class.into();
        self
    }

    pub fn with_marker_mirroring(mut self, mirror: bool) -> Self {
        self.mirror_marker_attribute = mirror;
        self
    }

    pub fn with_dom_events(mut self, dispatch: bool) -> Self {
        self.dispatch_dom_events = dispatch;
        self
    }
}
