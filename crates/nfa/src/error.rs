use thiserror::Error;

use crate::StateIndex;
use crate::StateLabel;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NfaError {
    #[error("State {0} has no label, labels must be assigned before closures or tables are computed")]
    MissingLabel(StateIndex),

    #[error("State {state} already has label {label}")]
    LabelAlreadySet { state: StateIndex, label: StateLabel },

    #[error("Label {0} is used by more than one state")]
    DuplicateLabel(StateLabel),

    #[error("The NFA transition table has not been built yet")]
    TableNotBuilt,

    #[error("Unknown state {0} in the NFA transition table")]
    UnknownState(StateLabel),

    #[error("At least one fragment is required")]
    EmptyFragmentList,
}
