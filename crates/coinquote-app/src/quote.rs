use crate::failure::Failure;
use crate::notify::Notifier;
use crate::selection::Selection;
use crate::surface::Surface;
use crate::view::{QuoteView, View};
use coinquote_client::{MarketData, Quote};
use std::sync::Arc;
use tracing::{debug, error, info, trace};

/// States a single submission passes through.
///
/// ```text
/// Idle -> Validating -> Loading -> Rendered -> Idle
///              |           |
///              +--------> Failed ---------> Idle
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Validating,
    Loading,
    Rendered,
    Failed,
}

impl Phase {
    pub fn can_advance_to(self, next: Phase) -> bool {
        use Phase::*;
        matches!(
            (self, next),
            (Idle, Validating)
                | (Validating, Loading)
                | (Validating, Failed)
                | (Loading, Rendered)
                | (Loading, Failed)
                | (Rendered, Idle)
                | (Failed, Idle)
        )
    }
}

#[derive(Debug)]
pub enum Outcome {
    Rendered(Quote),
    Failed(Failure),
}

/// Result of one submission, with every phase it went through.
#[derive(Debug)]
pub struct Submission {
    pub outcome: Outcome,
    pub trail: Vec<Phase>,
}

impl Submission {
    pub fn quote(&self) -> Option<&Quote> {
        match &self.outcome {
            Outcome::Rendered(quote) => Some(quote),
            Outcome::Failed(_) => None,
        }
    }

    pub fn failure(&self) -> Option<&Failure> {
        match &self.outcome {
            Outcome::Failed(failure) => Some(failure),
            Outcome::Rendered(_) => None,
        }
    }
}

struct Trail(Vec<Phase>);

impl Trail {
    fn start() -> Self {
        Self(vec![Phase::Idle])
    }

    fn advance(&mut self, next: Phase) {
        let current = *self.0.last().unwrap_or(&Phase::Idle);
        debug_assert!(
            current.can_advance_to(next),
            "illegal transition {current:?} -> {next:?}"
        );
        trace!("{current:?} -> {next:?}");
        self.0.push(next);
    }

    /// Back to `Idle` and hand over the trail.
    fn finish(mut self, outcome: Outcome) -> Submission {
        self.advance(Phase::Idle);
        Submission {
            outcome,
            trail: self.0,
        }
    }
}

/// Validates a submission, fetches its quote and drives the output region.
pub struct QuoteFetcher<A, S> {
    api: Arc<A>,
    surface: Arc<S>,
    notifier: Arc<Notifier<S>>,
}

impl<A: MarketData, S: Surface> QuoteFetcher<A, S> {
    pub fn new(api: Arc<A>, surface: Arc<S>, notifier: Arc<Notifier<S>>) -> Self {
        Self {
            api,
            surface,
            notifier,
        }
    }

    /// Run one submission against a snapshot of the selection.
    ///
    /// Submissions are not coordinated: if two overlap, the region shows whichever response
    /// arrives last.
    pub async fn submit(&self, selection: Selection) -> Submission {
        let mut trail = Trail::start();

        // Validating
        trail.advance(Phase::Validating);
        let request = match selection.request() {
            Ok(request) => request,
            Err(failure) => {
                debug!("Submission rejected: {selection:?}");
                self.notifier.notify(failure.to_string());
                trail.advance(Phase::Failed);
                return trail.finish(Outcome::Failed(failure));
            }
        };

        // Loading
        trail.advance(Phase::Loading);
        self.surface.render(&View::Loading);
        info!("Fetching {}/{} quote", request.crypto(), request.fiat());

        match self.api.quote(request.crypto(), request.fiat()).await {
            // Rendered
            Ok(quote) => {
                self.surface.render(&View::Quote(QuoteView::from(&quote)));
                trail.advance(Phase::Rendered);
                trail.finish(Outcome::Rendered(quote))
            }

            // Failed
            Err(e) => {
                error!("{}/{} quote failed | {e}", request.crypto(), request.fiat());
                self.surface.render(&View::Idle);
                let failure = Failure::Network(e);
                self.notifier.notify(failure.to_string());
                trail.advance(Phase::Failed);
                trail.finish(Outcome::Failed(failure))
            }
        }
    }
}
