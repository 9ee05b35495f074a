pub mod runner;
pub mod state;
pub mod transition;

pub use runner::Console;
pub use state::{
    ConsoleState, DeleteTarget, EditForm, FormKind, LoginField, LoginForm, MemberBoard, MemberForm,
    PendingRequest, SessionView,
};
pub use transition::{apply_transition, SideEffect, StateCommand, StateMachine, TransitionResult};
