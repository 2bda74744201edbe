use leptos::prelude::*;
use mapjitsu_shared::Tier;

pub const SEARCH: &str = "m21 21-6-6m2-5a7 7 0 11-14 0 7 7 0 0114 0z";
pub const MAP_PIN: &str = "M17.657 16.657L13.414 20.9a1.998 1.998 0 01-2.827 0l-4.244-4.243a8 8 0 1111.314 0z M15 11a3 3 0 11-6 0 3 3 0 016 0z";
const SHIELD: &str = "M9 12l2 2 4-4m5.618-4.016A11.955 11.955 0 0112 2.944a11.955 11.955 0 01-8.618 3.04A12.02 12.02 0 003 9c0 5.591 3.824 10.29 9 11.622 5.176-1.332 9-6.03 9-11.622 0-1.042-.133-2.052-.382-3.016z";
const CHECK_CIRCLE: &str = "M9 12l2 2 4-4m6 2a9 9 0 11-18 0 9 9 0 0118 0z";
const ALERT_TRIANGLE: &str = "M12 9v2m0 4h.01m-6.938 4h13.856c1.54 0 2.502-1.667 1.732-2.5L13.732 4c-.77-.833-1.728-.833-2.498 0L4.268 16.5c-.77.833.192 2.5 1.732 2.5z";
const X_CIRCLE: &str = "M10 14l2-2m0 0l2-2m-2 2l-2-2m2 2l2 2m7-2a9 9 0 11-18 0 9 9 0 0118 0z";

pub fn tier_path(tier: Tier) -> &'static str {
    match tier {
        Tier::Excellent => CHECK_CIRCLE,
        Tier::Good => SHIELD,
        Tier::Fair => ALERT_TRIANGLE,
        Tier::Caution => X_CIRCLE,
    }
}

/// 24x24 stroked outline icon.
#[component]
pub fn Icon(path: &'static str, #[prop(default = 16)] size: u32) -> impl IntoView {
    view! {
        <svg
            xmlns="http://www.w3.org/2000/svg"
            viewBox="0 0 24 24"
            fill="none"
            stroke="currentColor"
            width=size.to_string()
            height=size.to_string()
            aria-hidden="true"
        >
            <path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d=path />
        </svg>
    }
}

#[component]
pub fn TierIcon(tier: Tier) -> impl IntoView {
    view! { <Icon path=tier_path(tier) /> }
}
