use std::time::Duration;

pub(crate) const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
pub(crate) const TICK_RATE: Duration = Duration::from_millis(200);
pub(crate) const STATUS_TTL: Duration = Duration::from_secs(5);

/// Width of the `✖` hit zone at the right edge of every row.
pub(crate) const DELETE_ZONE_WIDTH: u16 = 3;
/// Width of the leading marker column of every row.
pub(crate) const MARKER_WIDTH: u16 = 2;

pub(crate) const STATUS_ENTER_ADD: &str = "Type the new task • Enter to add • Esc to cancel";
pub(crate) const STATUS_ENTER_EDIT: &str = "Edit the task • Enter to save • Esc to cancel";
pub(crate) const STATUS_VIEW_DETAILS: &str =
    "Task details • n show as notification • e edit • x delete • Enter/Esc close";
pub(crate) const STATUS_HELP: &str = "Keyboard and mouse reference: Enter/Esc to close";
pub(crate) const STATUS_CONFIRM_DELETE: &str =
    "Confirm deletion: arrows choose, Enter confirms, Esc cancels";
pub(crate) const STATUS_EXPORT_PATH: &str = "Export to file • Enter to write • Esc to cancel";
pub(crate) const STATUS_IMPORT_PATH: &str =
    "Import from file (replaces this category) • Enter to read • Esc to cancel";
pub(crate) const STATUS_MAIL: &str = "Open the link in a mail client • Enter/Esc to close";
