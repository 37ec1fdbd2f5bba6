//! Participants Page
//!
//! Turnout statistics, the two charts and the searchable participant list
//! with spreadsheet and PDF export.

use leptos::*;
use wasm_bindgen::JsCast;

use convite::export::{self, ExportFormat, ExportOptions, COLUMNS};
use convite::{SortKey, ViewAction};

use crate::api;
use crate::components::{ChartCanvas, ChartKind, Loading, StatCard};
use crate::state::{provide_participants_state, GlobalState, ParticipantsState};

/// Participants dashboard page
#[component]
pub fn Participants() -> impl IntoView {
    let global = use_context::<GlobalState>().expect("GlobalState not found");
    let state = provide_participants_state();

    // Fetch the snapshot once on mount; failures leave the list empty
    create_effect(move |_| {
        spawn_local(async move {
            state.loading.set(true);

            let result = api::fetch_invites().await;
            if let Err(e) = &result {
                web_sys::console::error_1(&format!("Failed to fetch participants: {}", e).into());
            }
            state.finish_load(result);
        });
    });

    let summary = create_memo(move |_| state.summary(global.target.get()));

    view! {
        <div class="space-y-4 sm:space-y-6">
            <div class="grid gap-2 sm:gap-4 grid-cols-2 lg:grid-cols-4">
                <StatCard
                    title="Total de Participantes"
                    description="Participantes confirmados"
                    accent="bg-gradient-to-br from-blue-950 to-blue-900"
                    value=Signal::derive(move || summary.get().count.to_string())
                    footer=Signal::derive(move || format!("de {} esperados", summary.get().target))
                />
                <StatCard
                    title="Meta Alcançada"
                    description="Percentagem de participação"
                    accent="bg-gradient-to-br from-green-950 to-green-900"
                    value=Signal::derive(move || format!("{:.1}%", summary.get().percentage_reached))
                    progress=Signal::derive(move || summary.get().percentage_reached)
                />
                <StatCard
                    title="Participantes Restantes"
                    description="Para atingir a meta"
                    accent="bg-gradient-to-br from-amber-950 to-amber-900"
                    value=Signal::derive(move || summary.get().remaining.to_string())
                    footer=Signal::derive(move || summary.get().remaining_label().to_string())
                />
                <StatCard
                    title="Taxa de Crescimento"
                    description="Novos participantes por dia"
                    accent="bg-gradient-to-br from-purple-950 to-purple-900"
                    value=Signal::derive(move || summary.get().growth_rate.to_string())
                    footer=Signal::derive(|| "participantes/dia".to_string())
                />
            </div>

            <div class="grid gap-2 sm:gap-4 grid-cols-1 md:grid-cols-2">
                <ChartPanel
                    title="Expectativa vs Realidade"
                    description="Comparação entre participantes esperados e confirmados"
                    kind=ChartKind::Comparison
                />
                <ChartPanel
                    title="Top 5 Localizações"
                    description="Distribuição geográfica dos participantes"
                    kind=ChartKind::Ranking
                />
            </div>

            <ParticipantList />
        </div>
    }
}

#[component]
fn ChartPanel(title: &'static str, description: &'static str, kind: ChartKind) -> impl IntoView {
    view! {
        <section class="bg-gray-800 rounded-xl p-2 sm:p-4">
            <h2 class="text-sm sm:text-lg font-semibold truncate">{title}</h2>
            <p class="text-xs sm:text-sm text-gray-400 truncate">{description}</p>
            <div class="h-60 sm:h-80 mt-2">
                <ChartCanvas kind=kind />
            </div>
        </section>
    }
}

/// Search, sort, export and the table itself
#[component]
fn ParticipantList() -> impl IntoView {
    let global = use_context::<GlobalState>().expect("GlobalState not found");
    let state = use_context::<ParticipantsState>().expect("ParticipantsState not found");

    let visible = create_memo(move |_| state.visible());
    let caption = move || {
        let total = state.records.with(|records| records.len());
        state.view.with(|view| view.caption(visible.with(|v| v.len()), total))
    };

    let export_as = move |format: ExportFormat| {
        let today = chrono::Utc::now().date_naive();
        let result = visible.with(|records| {
            export::render(format, records, &ExportOptions::default(), today)
        });

        match result {
            Ok(bytes) => {
                if let Err(e) = download(&bytes, format) {
                    web_sys::console::error_1(&format!("Download failed: {:?}", e).into());
                    global.show_error("Não foi possível descarregar o ficheiro");
                }
            }
            Err(e) => {
                web_sys::console::error_1(&format!("Export failed: {}", e).into());
                global.show_error("Erro ao exportar participantes");
            }
        }
    };

    view! {
        <section class="bg-gray-800 rounded-xl p-2 sm:p-4 space-y-4">
            <div class="flex flex-col sm:flex-row sm:items-center justify-between gap-2">
                <h2 class="text-lg sm:text-2xl font-bold text-primary-400 truncate">
                    "Lista de Participantes Confirmados"
                </h2>
                <div class="flex gap-2">
                    <button
                        on:click=move |_| export_as(ExportFormat::Xlsx)
                        class="px-3 py-1 rounded-lg border border-gray-600 hover:bg-gray-700 text-xs sm:text-sm"
                    >
                        "Excel"
                    </button>
                    <button
                        on:click=move |_| export_as(ExportFormat::Pdf)
                        class="px-3 py-1 rounded-lg border border-gray-600 hover:bg-gray-700 text-xs sm:text-sm"
                    >
                        "PDF"
                    </button>
                </div>
            </div>

            <p class="text-xs sm:text-sm text-gray-400 truncate">{caption}</p>

            <div class="flex flex-col sm:flex-row gap-2 sm:gap-4">
                <input
                    type="search"
                    placeholder="Pesquisar por nome..."
                    class="flex-1 bg-gray-700 rounded-lg px-3 py-2 text-xs sm:text-sm border border-gray-600 focus:border-primary-500 focus:outline-none"
                    prop:value=move || state.view.with(|view| view.query.clone())
                    on:input=move |ev| state.dispatch(ViewAction::SetQuery(event_target_value(&ev)))
                />
                <div class="flex gap-2">
                    <SortButton label="Nome" key=SortKey::Name />
                    <SortButton label="Data" key=SortKey::Date />
                </div>
            </div>

            {move || if state.loading.get() {
                view! { <Loading /> }.into_view()
            } else {
                view! { <ParticipantTable visible=visible /> }.into_view()
            }}
        </section>
    }
}

#[component]
fn SortButton(label: &'static str, key: SortKey) -> impl IntoView {
    let state = use_context::<ParticipantsState>().expect("ParticipantsState not found");
    let active = create_memo(move |_| state.view.with(|view| view.sort_key == key));

    view! {
        <button
            on:click=move |_| state.dispatch(ViewAction::ToggleSort(key))
            class=move || {
                let base = "px-3 py-2 rounded-lg border text-xs sm:text-sm";
                if active.get() {
                    format!("{} border-primary-500", base)
                } else {
                    format!("{} border-gray-600", base)
                }
            }
        >
            {label}
            " ⇅"
        </button>
    }
}

#[component]
fn ParticipantTable(visible: Memo<Vec<convite::AttendeeRecord>>) -> impl IntoView {
    view! {
        <div class="rounded-md border border-gray-700 overflow-x-auto">
            <table class="min-w-[600px] w-full text-left">
                <thead>
                    <tr class="border-b border-gray-700">
                        {COLUMNS.iter().map(|title| view! {
                            <th class="text-xs sm:text-sm px-3 py-2">{*title}</th>
                        }).collect_view()}
                    </tr>
                </thead>
                <tbody>
                    <For
                        each=move || visible.get()
                        key=|record| record.id.clone()
                        children=|record| {
                            let cells = export::row(&record);
                            view! {
                                <tr class="border-b border-gray-700/50">
                                    <td class="font-medium text-xs sm:text-sm px-3 py-2 sm:py-4">{cells[0].clone()}</td>
                                    <td class="text-xs sm:text-sm px-3 py-2 sm:py-4">{cells[1].clone()}</td>
                                    <td class="text-xs sm:text-sm px-3 py-2 sm:py-4">{cells[2].clone()}</td>
                                    <td class="text-xs sm:text-sm px-3 py-2 sm:py-4">{cells[3].clone()}</td>
                                    <td class="text-xs sm:text-sm px-3 py-2 sm:py-4">{cells[4].clone()}</td>
                                </tr>
                            }
                        }
                    />
                </tbody>
            </table>
        </div>
    }
}

/// Hand `bytes` to the browser as a file download
fn download(bytes: &[u8], format: ExportFormat) -> Result<(), wasm_bindgen::JsValue> {
    let window = web_sys::window().ok_or("no window")?;
    let document = window.document().ok_or("no document")?;

    let parts = js_sys::Array::of1(&js_sys::Uint8Array::from(bytes).into());
    let options = web_sys::BlobPropertyBag::new();
    options.set_type(format.mime_type());
    let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &options)?;

    let url = web_sys::Url::create_object_url_with_blob(&blob)?;
    let anchor = document
        .create_element("a")?
        .dyn_into::<web_sys::HtmlAnchorElement>()?;
    anchor.set_href(&url);
    anchor.set_download(format.file_name());
    anchor.click();

    web_sys::Url::revoke_object_url(&url)
}
