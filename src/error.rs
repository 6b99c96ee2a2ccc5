//! Error type shared by definition loading and menu construction.

use thiserror::Error;

use crate::host::WidgetAddress;

#[derive(Debug, Error)]
pub enum MenuError {
    /// A bundled definition resource could not be parsed.
    #[error("failed to load definition resource `{resource}`: {source}")]
    Definition {
        resource: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// The host fired the menu event without the widget being present.
    #[error("host widget {0} is not loaded")]
    MissingWidget(WidgetAddress),

    /// A menu event arrived while the plugin was shut down.
    #[error("plugin is not started")]
    NotStarted,
}
