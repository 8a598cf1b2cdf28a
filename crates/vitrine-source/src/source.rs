//! Async list source
//!
//! Drives a [`ListMachine`] with a [`Transport`]. All methods take `&self`,
//! so several triggers can be awaited concurrently on one thread; the
//! machine is only borrowed between awaits, never across one.

use std::cell::{Ref, RefCell};

use vitrine_net::Transport;

use crate::config::{EditorMode, SourceConfig};
use crate::state::{FetchRequest, ListMachine, ListSourceState, Phase};

/// Paginated list source bound to one transport
pub struct ListSource<T> {
    transport: T,
    machine: RefCell<ListMachine>,
}

impl<T: Transport> ListSource<T> {
    pub fn new(transport: T, config: SourceConfig) -> Self {
        Self {
            transport,
            machine: RefCell::new(ListMachine::new(config)),
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Borrow the current state. Do not hold across an await.
    pub fn state(&self) -> Ref<'_, ListSourceState> {
        Ref::map(self.machine.borrow(), ListMachine::state)
    }

    pub fn phase(&self) -> Phase {
        self.machine.borrow().phase()
    }

    pub fn config(&self) -> SourceConfig {
        self.machine.borrow().config().clone()
    }

    /// Run the initial load for the current configuration.
    pub async fn load(&self) {
        let request = self.machine.borrow_mut().start_load();
        self.run(request).await;
    }

    /// Apply a new configuration, reloading when it invalidates the list.
    pub async fn reconfigure(&self, config: SourceConfig) {
        let request = self.machine.borrow_mut().configure(config);
        self.run(request).await;
    }

    /// Fetch and append the next page, if pagination allows it.
    ///
    /// Meant to be called whenever the consumer nears the end of the
    /// rendered list; extra calls while a page is in flight are dropped.
    pub async fn load_more(&self, mode: EditorMode) {
        let request = self.machine.borrow_mut().begin_load_more(mode);
        self.run(request).await;
    }

    async fn run(&self, request: Option<FetchRequest>) {
        let Some(request) = request else {
            return;
        };
        let outcome = self.transport.get(&request.url).await;
        self.machine.borrow_mut().complete(&request, outcome);
    }
}
