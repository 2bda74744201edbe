use leptos::prelude::*;
use mapjitsu_shared::{Dimension, MapController};

use crate::app::MapNotice;

/// Floating legend in the map's lower-left corner.
#[component]
pub fn Legend() -> impl IntoView {
    let controller: RwSignal<MapController> = expect_context();
    let entries = controller.with_untracked(|c| c.legend());

    view! {
        <div style="position: absolute; left: 16px; bottom: 32px; z-index: 5; min-width: 180px; padding: 12px 14px; background: rgba(255,255,255,0.95); border: 1px solid #e2e8f0; border-radius: 8px; box-shadow: 0 4px 16px rgba(15,23,42,0.08); font-family: 'Inter', system-ui, sans-serif;">
            <div style="font-size: 0.72rem; font-weight: 600; color: #334155; text-transform: uppercase; letter-spacing: 0.05em; margin-bottom: 8px;">"Safety Score"</div>
            {entries
                .into_iter()
                .map(|entry| {
                    view! {
                        <div style="display: flex; align-items: center; justify-content: space-between; gap: 12px; padding: 2px 0;">
                            <div style="display: flex; align-items: center; gap: 8px;">
                                <div style=format!(
                                    "width: 10px; height: 10px; border-radius: 9999px; background: {};",
                                    entry.tier.color_hex()
                                ) />
                                <span style="font-size: 0.75rem; color: #475569;">{entry.tier.legend_label()}</span>
                            </div>
                            <span style="font-size: 0.72rem; color: #94a3b8; font-variant-numeric: tabular-nums;">{entry.count.to_string()}</span>
                        </div>
                    }
                })
                .collect_view()}
        </div>
    }
}

/// Style and 2D/3D toggles.
#[component]
pub fn ModeControls() -> impl IntoView {
    let controller: RwSignal<MapController> = expect_context();
    let style = Memo::new(move |_| controller.with(|c| c.style()));
    let dimension = Memo::new(move |_| controller.with(|c| c.dimension()));

    let button_style = "height: 32px; padding: 0 12px; background: #ffffff; border: 1px solid #e2e8f0; border-radius: 6px; box-shadow: 0 2px 8px rgba(15,23,42,0.08); cursor: pointer; font-family: 'Inter', system-ui, sans-serif; font-size: 0.75rem; font-weight: 600; color: #334155;";

    view! {
        <div style="position: absolute; top: 16px; left: 16px; z-index: 5; display: flex; gap: 8px;">
            <button
                style=button_style
                title="Cycle map style"
                on:click=move |_| {
                    controller.update(|c| {
                        c.toggle_style();
                    });
                }
            >
                {move || style.get().label()}
            </button>
            <button
                style=button_style
                title="Toggle 3D view"
                style:color=move || if dimension.get() == Dimension::Tilted { "#2563eb" } else { "#334155" }
                on:click=move |_| {
                    controller.update(|c| {
                        c.toggle_dimension();
                    });
                }
            >
                {move || dimension.get().label()}
            </button>
        </div>
    }
}

/// Empty-state notice shown in place of the map when it cannot render.
#[component]
pub fn MapNoticeBanner() -> impl IntoView {
    let MapNotice(notice) = expect_context();

    view! {
        {move || {
            let Some(message) = notice.get() else {
                return ().into_any();
            };
            view! {
                <div style="position: absolute; inset: 0; display: flex; align-items: center; justify-content: center; background: #f1f5f9; z-index: 4;">
                    <div style="max-width: 360px; padding: 20px 24px; background: #ffffff; border: 1px solid #fde68a; border-radius: 8px; box-shadow: 0 4px 16px rgba(15,23,42,0.08); font-family: 'Inter', system-ui, sans-serif; text-align: center;">
                        <div style="font-size: 0.95rem; font-weight: 600; color: #a16207;">"Map unavailable"</div>
                        <div style="margin-top: 6px; font-size: 0.8rem; color: #475569; line-height: 1.5;">{message}</div>
                        <div style="margin-top: 10px; font-size: 0.72rem; color: #94a3b8;">"Search and location details still work from the sidebar."</div>
                    </div>
                </div>
            }
            .into_any()
        }}
    }
}

#[component]
pub fn Attribution() -> impl IntoView {
    view! {
        <div style="position: absolute; right: 8px; bottom: 4px; z-index: 5; font-family: 'Inter', system-ui, sans-serif; font-size: 0.65rem; color: #94a3b8;">
            "\u{00A9} MapJitsu 2025 | \u{00A9} Mapbox"
        </div>
    }
}
