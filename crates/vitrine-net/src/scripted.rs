//! Scripted transport
//!
//! Serves canned responses in request order. Used for offline rendering
//! from fixture files and for driving list sources deterministically.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::future::Future;

use crate::{NetError, Response, Transport};
use url::Url;

struct Scripted {
    result: Result<Response, NetError>,
    /// Executor turns to yield before answering
    delay: usize,
}

/// Transport answering from a queue of prepared results.
///
/// Each request takes the next queued result at the moment it is issued,
/// so responses are matched to requests by issue order even when a delayed
/// response completes after a later one.
#[derive(Default)]
pub struct ScriptedTransport {
    queue: RefCell<VecDeque<Scripted>>,
    fallback: Option<Result<Response, NetError>>,
    requests: RefCell<Vec<Url>>,
    in_flight: Cell<usize>,
    max_in_flight: Cell<usize>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a result answered immediately.
    pub fn respond(self, result: Result<Response, NetError>) -> Self {
        self.respond_delayed(result, 0)
    }

    /// Queue a JSON body with status 200.
    pub fn respond_json(self, body: &serde_json::Value) -> Self {
        self.respond(Ok(Response::ok(body.to_string())))
    }

    /// Queue a result answered after `delay` executor turns.
    pub fn respond_delayed(self, result: Result<Response, NetError>, delay: usize) -> Self {
        self.queue.borrow_mut().push_back(Scripted { result, delay });
        self
    }

    /// Result used once the queue is exhausted.
    pub fn otherwise(mut self, result: Result<Response, NetError>) -> Self {
        self.fallback = Some(result);
        self
    }

    /// Every URL requested so far, in issue order.
    pub fn requests(&self) -> Vec<Url> {
        self.requests.borrow().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.borrow().len()
    }

    /// Highest number of requests observed in flight at the same time.
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.get()
    }
}

impl Transport for ScriptedTransport {
    fn get(&self, url: &Url) -> impl Future<Output = Result<Response, NetError>> {
        self.requests.borrow_mut().push(url.clone());
        let next = self.queue.borrow_mut().pop_front();
        let Scripted { result, delay } = match next {
            Some(scripted) => scripted,
            None => Scripted {
                result: self
                    .fallback
                    .clone()
                    .unwrap_or_else(|| Err(NetError::Network(format!("no scripted response for {url}")))),
                delay: 0,
            },
        };

        self.in_flight.set(self.in_flight.get() + 1);
        self.max_in_flight.set(self.max_in_flight.get().max(self.in_flight.get()));

        async move {
            for _ in 0..delay {
                smol::future::yield_now().await;
            }
            self.in_flight.set(self.in_flight.get() - 1);
            result
        }
    }
}
