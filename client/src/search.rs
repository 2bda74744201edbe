use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use mapjitsu_shared::{MapController, SearchOutcome, SearchTicket};
use wasm_bindgen_futures::spawn_local;

use crate::config::SEARCH_DELAY_MS;

/// Search for the current search-box text after the simulated latency.
/// A later submission supersedes any search still waiting on its timer.
pub fn submit(controller: RwSignal<MapController>) {
    let ticket = controller
        .try_update(|c| {
            let query = c.search_text().to_string();
            c.begin_search(&query)
        })
        .flatten();
    let Some(ticket) = ticket else {
        return;
    };

    spawn_local(async move {
        TimeoutFuture::new(SEARCH_DELAY_MS).await;
        let Some(outcome) = controller.try_update(|c| c.resolve_search(&ticket)) else {
            return;
        };
        log_outcome(&ticket, outcome);
    });
}

fn log_outcome(ticket: &SearchTicket, outcome: SearchOutcome) {
    let line = match outcome {
        SearchOutcome::Found(id) => format!(
            "search #{} \"{}\": matched location {id}",
            ticket.seq(),
            ticket.query()
        ),
        SearchOutcome::NotFound => format!(
            "search #{} \"{}\": no match, showing default region",
            ticket.seq(),
            ticket.query()
        ),
        SearchOutcome::Superseded => format!(
            "search #{} \"{}\": superseded, result discarded",
            ticket.seq(),
            ticket.query()
        ),
    };
    web_sys::console::info_1(&line.into());
}
