use leptos::prelude::*;
use mapjitsu_shared::{LocationRecord, MapController, Tier};
use wasm_bindgen::JsCast;

use crate::colors::tier_tint;
use crate::config::PREVIEW_COUNT;
use crate::format::{format_count, format_score};
use crate::icons::{self, Icon, TierIcon};
use crate::search;

/// Sidebar with search, quick stats, and either the selected location's
/// details or the empty-state preview.
#[component]
pub fn Sidebar() -> impl IntoView {
    let controller: RwSignal<MapController> = expect_context();
    let selected = Memo::new(move |_| controller.with(|c| c.selected().cloned()));

    view! {
        <SidebarHeader />
        <div style="flex: 1; overflow-y: auto;">
            {move || match selected.get() {
                Some(record) => view! { <DetailPanel record=record /> }.into_any(),
                None => view! { <EmptyState /> }.into_any(),
            }}
        </div>
    }
}

#[component]
fn SidebarHeader() -> impl IntoView {
    view! {
        <div style="padding: 24px 24px 16px; border-bottom: 1px solid #e2e8f0;">
            <div style="display: flex; align-items: center; gap: 10px;">
                <div style="width: 36px; height: 36px; border-radius: 8px; background: linear-gradient(135deg, #2563eb, #16a34a); color: #ffffff; display: flex; align-items: center; justify-content: center;">
                    <Icon path=icons::MAP_PIN size=20 />
                </div>
                <div>
                    <div style="font-family: 'Inter', system-ui, sans-serif; font-size: 1.25rem; font-weight: 700; color: #0f172a; letter-spacing: -0.01em;">"MapJitsu"</div>
                    <div style="font-family: 'Inter', system-ui, sans-serif; font-size: 0.72rem; color: #64748b;">"Location Intelligence"</div>
                </div>
            </div>
            <p style="margin: 12px 0 0; font-family: 'Inter', system-ui, sans-serif; font-size: 0.85rem; color: #475569;">
                "AI-powered insights for safer, smarter navigation"
            </p>
            <SearchBar />
            <QuickStats />
        </div>
    }
}

#[component]
fn SearchBar() -> impl IntoView {
    let controller: RwSignal<MapController> = expect_context();
    let searching = Memo::new(move |_| controller.with(|c| c.is_searching()));

    let on_input = move |e: leptos::ev::Event| {
        let Some(target) = e.target() else {
            return;
        };
        let Ok(input) = target.dyn_into::<web_sys::HtmlInputElement>() else {
            return;
        };
        controller.update(|c| c.set_search_text(input.value()));
    };

    let on_keydown = move |e: leptos::ev::KeyboardEvent| {
        if e.key() == "Enter" {
            search::submit(controller);
        }
    };

    view! {
        <div style="position: relative; margin-top: 16px;">
            <div style="position: absolute; left: 12px; top: 50%; transform: translateY(-50%); pointer-events: none; color: #94a3b8; display: flex;">
                <Icon path=icons::SEARCH />
            </div>
            <input
                data-search-input=""
                style="width: 100%; height: 40px; padding: 8px 96px 8px 36px; background: #ffffff; border: 1px solid #cbd5e1; border-radius: 6px; color: #0f172a; font-family: 'Inter', system-ui, sans-serif; font-size: 0.875rem; outline: none; box-sizing: border-box;"
                type="text"
                placeholder="Search locations, addresses..."
                prop:value=move || controller.with(|c| c.search_text().to_string())
                on:input=on_input
                on:keydown=on_keydown
            />
            <button
                style="position: absolute; right: 4px; top: 4px; height: 32px; padding: 0 12px; border: none; border-radius: 4px; background: #2563eb; color: #ffffff; font-family: 'Inter', system-ui, sans-serif; font-size: 0.75rem; font-weight: 600; cursor: pointer;"
                style:opacity=move || if searching.get() { "0.6" } else { "1" }
                disabled=move || searching.get()
                on:click=move |_| search::submit(controller)
            >
                {move || if searching.get() { "Searching\u{2026}" } else { "Search" }}
            </button>
        </div>
    }
}

#[component]
fn QuickStats() -> impl IntoView {
    let controller: RwSignal<MapController> = expect_context();
    let stats = controller.with_untracked(|c| c.aggregates());

    view! {
        <div style="display: grid; grid-template-columns: 1fr 1fr; gap: 8px; margin-top: 16px;">
            <StatTile label="Avg. score" value=stats.average_display() />
            <StatTile label="Signals" value=format_count(stats.total_signals) />
        </div>
    }
}

#[component]
fn StatTile(label: &'static str, value: String) -> impl IntoView {
    view! {
        <div style="padding: 10px 12px; background: #f8fafc; border: 1px solid #e2e8f0; border-radius: 6px;">
            <div style="font-family: 'Inter', system-ui, sans-serif; font-size: 1.1rem; font-weight: 700; color: #0f172a; font-variant-numeric: tabular-nums;">{value}</div>
            <div style="font-family: 'Inter', system-ui, sans-serif; font-size: 0.7rem; color: #64748b; text-transform: uppercase; letter-spacing: 0.05em;">{label}</div>
        </div>
    }
}

/// Score pill colored by tier.
#[component]
pub fn ScoreBadge(tier: Tier, text: String) -> impl IntoView {
    let (r, g, b) = tier.color_rgb();
    view! {
        <span
            class=tier.badge_class()
            style=format!(
                "display: inline-flex; align-items: center; padding: 2px 10px; border-radius: 9999px; font-family: 'Inter', system-ui, sans-serif; font-size: 0.75rem; font-weight: 600; color: rgb({r},{g},{b}); background: {}; border: 1px solid {};",
                tier_tint(tier, 0.1),
                tier_tint(tier, 0.3),
            )
        >
            {text}
        </span>
    }
}

#[component]
fn DetailPanel(record: LocationRecord) -> impl IntoView {
    let tier = record.tier();
    let cards = record
        .categories
        .iter()
        .enumerate()
        .map(|(index, (category, score, tier))| {
            view! {
                <div
                    class="card-animate"
                    style=format!(
                        "display: flex; align-items: center; justify-content: space-between; padding: 12px 14px; background: #ffffff; border: 1px solid #e2e8f0; border-left: 4px solid {}; border-radius: 6px; animation-delay: {}ms;",
                        tier.color_hex(),
                        index * 75,
                    )
                >
                    <div style="display: flex; align-items: center; gap: 10px;">
                        <div style=format!("display: flex; color: {};", tier.color_hex())>
                            <TierIcon tier=tier />
                        </div>
                        <div>
                            <div style="font-family: 'Inter', system-ui, sans-serif; font-size: 0.85rem; font-weight: 600; color: #0f172a; text-transform: capitalize;">{category.label()}</div>
                            <div style="font-family: 'Inter', system-ui, sans-serif; font-size: 0.72rem; color: #64748b;">{format!("{} rating", tier.key())}</div>
                        </div>
                    </div>
                    <ScoreBadge tier=tier text=format!("{}/10", format_score(score)) />
                </div>
            }
        })
        .collect_view();

    view! {
        <div style="padding: 20px 24px; display: flex; flex-direction: column; gap: 20px;">
            <div>
                <h2 style="margin: 0; font-family: 'Inter', system-ui, sans-serif; font-size: 1.15rem; font-weight: 700; color: #0f172a;">{record.name.clone()}</h2>
                {record.address.clone().map(|address| view! {
                    <p style="margin: 4px 0 0; font-family: 'Inter', system-ui, sans-serif; font-size: 0.8rem; color: #64748b;">{address}</p>
                })}
                {record.description.clone().map(|description| view! {
                    <p style="margin: 8px 0 0; font-family: 'Inter', system-ui, sans-serif; font-size: 0.85rem; color: #475569;">{description}</p>
                })}
                <div style="display: flex; align-items: center; justify-content: space-between; margin-top: 12px;">
                    <ScoreBadge tier=tier text=format!("{}/10", format_score(record.overall_score)) />
                    <div style="text-align: right; font-family: 'Inter', system-ui, sans-serif; font-size: 0.72rem; color: #64748b;">
                        <div>{format!("{} signals", format_count(u64::from(record.signal_count)))}</div>
                        <div>{format!("Updated {}", record.last_updated)}</div>
                    </div>
                </div>
            </div>
            <div>
                <h3 style="margin: 0 0 10px; font-family: 'Inter', system-ui, sans-serif; font-size: 0.8rem; font-weight: 600; color: #334155; text-transform: uppercase; letter-spacing: 0.05em;">"Category Analysis"</h3>
                <div style="display: flex; flex-direction: column; gap: 8px;">{cards}</div>
            </div>
            <div style="padding-top: 12px; border-top: 1px solid #e2e8f0; font-family: 'Inter', system-ui, sans-serif; font-size: 0.72rem; color: #94a3b8;">
                <div>"Data sources: Public records, user reports, AI analysis"</div>
                <div style="margin-top: 2px;">{format!("Last verification: {}", record.last_updated)}</div>
            </div>
        </div>
    }
}

#[component]
fn EmptyState() -> impl IntoView {
    let controller: RwSignal<MapController> = expect_context();
    let preview = controller.with_untracked(|c| c.preview(PREVIEW_COUNT).to_vec());

    view! {
        <div style="padding: 24px; display: flex; flex-direction: column; align-items: center; text-align: center;">
            <div style="width: 48px; height: 48px; border-radius: 9999px; background: #eff6ff; color: #2563eb; display: flex; align-items: center; justify-content: center;">
                <Icon path=icons::MAP_PIN size=24 />
            </div>
            <p style="margin: 12px 0 0; font-family: 'Inter', system-ui, sans-serif; font-size: 0.85rem; color: #64748b; line-height: 1.5;">
                "Click on any marker on the map to view detailed safety and reputation insights, or use the search bar to find specific locations."
            </p>
            <div style="width: 100%; margin-top: 20px; text-align: left;">
                <div style="font-family: 'Inter', system-ui, sans-serif; font-size: 0.72rem; font-weight: 600; color: #94a3b8; text-transform: uppercase; letter-spacing: 0.05em; margin-bottom: 8px;">"Nearby locations"</div>
                <div style="display: flex; flex-direction: column; gap: 6px;">
                    {preview
                        .into_iter()
                        .map(|record| {
                            let id = record.id;
                            view! {
                                <button
                                    style="display: flex; align-items: center; justify-content: space-between; width: 100%; padding: 10px 12px; background: #ffffff; border: 1px solid #e2e8f0; border-radius: 6px; cursor: pointer; font-family: 'Inter', system-ui, sans-serif; text-align: left;"
                                    on:click=move |_| {
                                        controller.update(|c| {
                                            c.select_marker(id);
                                        });
                                    }
                                >
                                    <span style="font-size: 0.85rem; font-weight: 500; color: #0f172a;">{record.name.clone()}</span>
                                    <ScoreBadge tier=record.tier() text=format_score(record.overall_score) />
                                </button>
                            }
                        })
                        .collect_view()}
                </div>
            </div>
        </div>
    }
}
