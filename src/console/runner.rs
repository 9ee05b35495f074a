use std::sync::Arc;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::client::MemberClient;
use crate::error::ApiFailure;
use crate::logging::{log_debug, log_error};

use super::state::ConsoleState;
use super::transition::{SideEffect, StateCommand, StateMachine};

/// Drives the state machine: commands go in, side effects run as tokio
/// tasks, and each task reports back with a completion command. All state
/// changes happen on the caller's side of the channel.
pub struct Console {
    client: Arc<MemberClient>,
    machine: StateMachine,
    sender: UnboundedSender<StateCommand>,
    receiver: UnboundedReceiver<StateCommand>,
    in_flight: usize,
}

impl Console {
    pub fn new(client: MemberClient) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        Self {
            client: Arc::new(client),
            machine: StateMachine::default(),
            sender,
            receiver,
            in_flight: 0,
        }
    }

    pub fn state(&self) -> &ConsoleState {
        self.machine.current_state()
    }

    /// Swap in a prepared state without going through commands.
    #[cfg(test)]
    pub(crate) fn replace_state(&mut self, state: ConsoleState) {
        self.machine = StateMachine::new(state);
    }

    /// Requests started and not yet reported back.
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Apply a command and start whatever requests it asks for.
    /// Must be called from inside a tokio runtime.
    pub fn dispatch(&mut self, command: StateCommand) {
        let result = self.machine.process_command(command);
        for effect in result.side_effects {
            self.spawn(effect);
        }
    }

    fn spawn(&mut self, effect: SideEffect) {
        self.in_flight += 1;
        let client = Arc::clone(&self.client);
        let sender = self.sender.clone();
        tokio::spawn(async move {
            let completion = perform(&client, effect).await;
            // The receiver lives as long as the console; a closed channel means it is gone.
            let _ = sender.send(completion);
        });
    }

    fn complete(&mut self, command: StateCommand) {
        self.in_flight = self.in_flight.saturating_sub(1);
        self.dispatch(command);
    }

    /// Apply every completion that has already arrived. Returns true if any did.
    pub fn poll_completions(&mut self) -> bool {
        let mut changed = false;
        while let Ok(command) = self.receiver.try_recv() {
            self.complete(command);
            changed = true;
        }
        changed
    }

    /// Wait until no request is outstanding, including the ones that
    /// completions start along the way.
    pub async fn settle(&mut self) {
        while self.in_flight > 0 {
            match self.receiver.recv().await {
                Some(command) => self.complete(command),
                None => break,
            }
        }
    }

    /// Dispatch and wait for the whole chain of requests to finish.
    pub async fn run(&mut self, command: StateCommand) -> &ConsoleState {
        self.dispatch(command);
        self.settle().await;
        self.state()
    }
}

fn logged<T>(what: &str, result: Result<T, ApiFailure>) -> Result<T, ApiFailure> {
    if let Err(failure) = &result {
        log_error(&format!("{} failed: {}", what, failure));
    }
    result
}

/// Perform one request and turn its outcome into the matching completion.
async fn perform(client: &MemberClient, effect: SideEffect) -> StateCommand {
    log_debug(&format!("Performing {:?}", effect));

    match effect {
        SideEffect::FetchSession => {
            StateCommand::SessionResolved(logged("Session check", client.session().await))
        }
        SideEffect::FetchCsrf => {
            StateCommand::CsrfRefreshed(logged("Token refresh", client.fetch_csrf().await))
        }
        SideEffect::Login { credentials, csrf } => {
            let result = client.login(&credentials, csrf.as_deref()).await;
            StateCommand::LoginCompleted(logged("Login", result))
        }
        SideEffect::Logout => {
            StateCommand::LogoutCompleted(logged("Logout", client.logout().await))
        }
        SideEffect::LoadMembers => {
            StateCommand::MembersLoaded(logged("Fetching members", client.list_members().await))
        }
        SideEffect::CreateMember { draft, csrf } => {
            let result = client.create_member(&draft, csrf.as_deref()).await;
            StateCommand::MemberCreated(logged("Adding member", result))
        }
        SideEffect::UpdateMember { url, draft, csrf } => {
            let result = client.update_member(&url, &draft, csrf.as_deref()).await;
            StateCommand::MemberUpdated(logged("Updating member", result))
        }
        SideEffect::DeleteMember { url, csrf } => {
            let result = client.delete_member(&url, csrf.as_deref()).await;
            StateCommand::MemberDeleted {
                result: logged("Deleting member", result),
                url,
            }
        }
    }
}
