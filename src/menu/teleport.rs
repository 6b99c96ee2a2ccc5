//! Replays a discovered teleport through the host's key-event script.

use crate::host::{HostUi, WidgetAddress};

use super::layout::{KEY_EVENTS_ALTERNATE, KEY_EVENTS_PRIMARY, SCRIPT_TRIGGER_KEY};
use super::scanner::{Teleport, Variant};

/// Key-event container whose row `child_index` fires the teleport.
pub fn key_event_token(variant: Variant) -> WidgetAddress {
    match variant {
        Variant::Primary => KEY_EVENTS_PRIMARY,
        Variant::Alternate => KEY_EVENTS_ALTERNATE,
    }
}

/// Queue the teleport for the next UI tick.
///
/// The row index was captured at scan time and is not re-checked: if the
/// portal rebuilds its list before the tick, the script fires whatever row now
/// sits at that index.
pub fn trigger_teleport(host: &mut dyn HostUi, teleport: &Teleport) {
    let token = key_event_token(teleport.variant).packed();
    let Ok(index) = i32::try_from(teleport.child_index) else {
        log::warn!(
            "teleport to {}: row {} does not fit a script argument",
            teleport.name,
            teleport.child_index
        );
        return;
    };

    log::info!("teleport to {} (row {} of {:#x})", teleport.name, index, token);
    host.invoke_later(Box::new(move |host: &mut dyn HostUi| {
        host.run_script(SCRIPT_TRIGGER_KEY, &[token, index]);
    }));
}
