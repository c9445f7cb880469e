use std::fmt;

#[derive(Debug)]
pub enum ReconError {
    /// TOML parse / deserialization error.
    ConfigParse(String),
    /// Config validation error (bad quantity, rebate out of range, empty
    /// selectors, ...).
    ConfigValidation(String),
    /// Partner table holds duplicate (block, distance, item_id) keys; the
    /// join must be many-client-to-at-most-one-partner.
    DuplicatePartnerKey {
        block: String,
        distance: String,
        item_id: String,
    },
    /// Override CSV lacks required columns.
    MissingColumns { columns: Vec<String> },
    /// The selected (block, distance) package has no rows in the
    /// reconciled table.
    UnknownPackage { block: String, distance: String },
    /// Zero included items. Precondition, re-checked per selection.
    EmptySelection,
    /// IO error (file read, etc.).
    Io(String),
}

impl fmt::Display for ReconError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigParse(msg) => write!(f, "config parse error: {msg}"),
            Self::ConfigValidation(msg) => write!(f, "config validation error: {msg}"),
            Self::DuplicatePartnerKey {
                block,
                distance,
                item_id,
            } => write!(
                f,
                "ambiguous join: partner list has duplicate key \
                 (block '{block}', distance '{distance}', item '{item_id}')"
            ),
            Self::MissingColumns { columns } => {
                write!(f, "override CSV missing required columns: {}", columns.join(", "))
            }
            Self::UnknownPackage { block, distance } => {
                write!(f, "no rows for package (block '{block}', distance '{distance}')")
            }
            Self::EmptySelection => write!(f, "no items included: select at least one item"),
            Self::Io(msg) => write!(f, "IO error: {msg}"),
        }
    }
}

impl std::error::Error for ReconError {}
