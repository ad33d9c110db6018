use dioxus::events::FormData;
use dioxus::prelude::*;
use gloo_timers::future::TimeoutFuture;

mod api;
mod types;
mod ui_utils;
use types::{CreateLibraryRequest, MoveDirection, PageView, RefreshTaskEvent, ScanOutcome, TaskState};
use ui_utils::{collection_label, progress_style, show_toast};

// Backend answers "loading" until the media server has been reached once
const LOADING_RETRY_MS: u32 = 1000;

pub fn main() {
    console_error_panic_hook::set_once();
    dioxus_web::launch::launch(app, vec![], Default::default());
}

fn app() -> Element {
    rsx! {
        div {
            div { class: "app-header",
                div { class: "container",
                    div { class: "brand",
                        span { "Libraries" }
                    }
                }
            }
            Libraries {}
            // Toast container for notifications
            div { id: "toasts", class: "toast-container" }
        }
    }
}

#[component]
fn Libraries() -> Element {
    let page = use_signal(|| PageView::Loading);
    let load_err = use_signal(|| None as Option<String>);
    // Bumped to force a reload of the page data
    let reload_tick = use_signal(|| 0_u32);
    // Keeps the SSE connection alive
    let es_ref = use_signal(|| None as Option<web_sys::EventSource>);

    // Page data: retry while the backend is still waiting for its first poll
    use_effect(move || {
        let _tick = reload_tick();
        let mut page = page;
        let mut load_err = load_err;
        spawn(async move {
            loop {
                match api::get_page().await {
                    Ok(PageView::Loading) => TimeoutFuture::new(LOADING_RETRY_MS).await,
                    Ok(view) => {
                        page.set(view);
                        load_err.set(None);
                        break;
                    }
                    Err(e) => {
                        load_err.set(Some(e));
                        break;
                    }
                }
            }
        });
    });

    // Live refresh-task progress
    use_effect(move || {
        let mut page = page;
        let mut reload_tick = reload_tick;
        let mut es_ref = es_ref;
        let attached = api::sse_attach(move |ev| {
            let mut finished = false;
            if let PageView::Ready(view) = &mut *page.write() {
                let scan = &mut view.scan;
                match ev {
                    RefreshTaskEvent::Snapshot { task_id, state, progress } => {
                        let busy = state == TaskState::Running;
                        finished = scan.busy && !busy;
                        scan.task_id = Some(task_id);
                        scan.enabled = true;
                        scan.busy = busy;
                        scan.progress = if busy { progress } else { None };
                    }
                    RefreshTaskEvent::Missing => {
                        scan.task_id = None;
                        scan.enabled = false;
                        scan.busy = false;
                        scan.progress = None;
                    }
                }
            }
            // A finished scan may have changed the library set
            if finished {
                reload_tick += 1;
            }
        });
        match attached {
            Ok(es) => es_ref.set(Some(es)),
            Err(e) => show_toast(&e),
        }
    });

    use_drop(move || {
        if let Some(es) = es_ref.peek().as_ref() {
            es.close();
        }
    });

    let start_scan = move |_| {
        let mut reload_tick = reload_tick;
        spawn(async move {
            match api::scan_all().await {
                Ok(ScanOutcome::Requested { .. }) => show_toast("Library scan started"),
                Ok(ScanOutcome::Skipped) => show_toast("No library scan task available"),
                Err(e) => show_toast(&format!("Scan failed: {}", e)),
            }
            reload_tick += 1;
        });
    };

    let body = match &*page.read() {
        PageView::Loading => rsx! {
            div { class: "toolbar",
                span { class: "spinner", "" }
                span { "Loading libraries..." }
            }
        },
        PageView::Ready(view) => {
            let scan = view.scan.clone();
            let bar_width = progress_style(scan.progress);
            rsx! {
                div { class: "toolbar", style: "margin-top:6px;",
                    button { class: "btn btn-primary", disabled: !scan.enabled || scan.busy, onclick: start_scan,
                        if scan.busy { "Scanning..." } else { "Scan All Libraries" }
                    }
                    if scan.busy {
                        div { class: "bar-shell", style: "min-width:200px;",
                            div { class: "bar-fill-purple", style: "{bar_width}" }
                        }
                        { scan.progress.map(|p| rsx!(span { {format!("{:.0}%", p)} })) }
                    }
                }
                AddLibraryForm { on_added: move |_| { let mut t = reload_tick; t += 1; } }
                details { open: true,
                    summary { "Library order" }
                    ul { class: "list-unstyled",
                        for entry in view.order.iter().cloned() {
                            ReorderRow { key: "{entry.name}", name: entry.name.clone(), can_move_up: entry.can_move_up,
                                can_move_down: entry.can_move_down, on_moved: move |_| { let mut t = reload_tick; t += 1; } }
                        }
                    }
                }
                div { style: "display:grid;grid-template-columns:repeat(auto-fill,minmax(240px,1fr));gap:10px;margin-top:8px;",
                    for lib in view.libraries.iter() {
                        div { key: "{lib.item_id}", style: "border:1px solid #222533;background:#0f1117;border-radius:10px;padding:10px;display:flex;flex-direction:column;gap:6px;",
                            strong { "{lib.name}" }
                            span { style: "color:#9aa0a6;", "{collection_label(lib.collection_type.as_deref())}" }
                            for loc in lib.locations.iter() {
                                span { style: "color:#a0aec0;font-size:12px;", "{loc}" }
                            }
                        }
                    }
                }
                { view.libraries.is_empty().then(|| rsx!(div { class: "text-muted", "No libraries configured yet." })) }
            }
        }
    };

    rsx! {
        section { class: "panel",
            h2 { "Libraries" }
            { load_err.read().as_ref().map(|e| rsx!(div { class: "alert alert-error", "Failed to load libraries: {e}" })) }
            {body}
        }
    }
}

#[component]
fn ReorderRow(name: String, can_move_up: bool, can_move_down: bool, on_moved: EventHandler<()>) -> Element {
    let mv = {
        let name = name.clone();
        move |direction: MoveDirection| {
            let name = name.clone();
            spawn(async move {
                match api::move_library(&name, direction).await {
                    Ok(_) => on_moved.call(()),
                    Err(e) => show_toast(&format!("Could not save order: {}", e)),
                }
            });
        }
    };
    let mv_down = mv.clone();
    let mv_up = mv;
    rsx! {
        li { style: "margin:6px 0;display:flex;gap:8px;align-items:center;",
            button { class: "btn", disabled: !can_move_up, onclick: move |_| mv_up(MoveDirection::Up), "▲" }
            button { class: "btn", disabled: !can_move_down, onclick: move |_| mv_down(MoveDirection::Down), "▼" }
            span { "{name}" }
        }
    }
}

#[component]
fn AddLibraryForm(on_added: EventHandler<()>) -> Element {
    let kinds = use_signal(Vec::<types::CollectionTypeOption>::new);
    let name = use_signal(String::new);
    let kind = use_signal(|| "movies".to_string());
    let path = use_signal(String::new);
    let saving = use_signal(|| false);

    use_effect(move || {
        let mut kinds = kinds;
        spawn(async move {
            match api::collection_types().await {
                Ok(list) => kinds.set(list),
                Err(e) => show_toast(&format!("Could not load library types: {}", e)),
            }
        });
    });

    let submit = move |_| {
        let name_val = name.read().trim().to_string();
        if name_val.is_empty() {
            show_toast("Please enter a library name");
            return;
        }
        let path_val = path.read().trim().to_string();
        let req = CreateLibraryRequest {
            name: name_val,
            collection_type: kind.read().clone(),
            paths: if path_val.is_empty() { vec![] } else { vec![path_val] },
        };
        let mut saving = saving;
        let mut name = name;
        let mut path = path;
        saving.set(true);
        spawn(async move {
            match api::create_library(&req).await {
                Ok(resp) if resp.changed => {
                    show_toast(&format!("Library {} added", req.name));
                    name.set(String::new());
                    path.set(String::new());
                    on_added.call(());
                }
                Ok(_) => show_toast("The media server did not add the library"),
                Err(e) => show_toast(&format!("Could not add library: {}", e)),
            }
            saving.set(false);
        });
    };

    rsx! {
        details {
            summary { "Add library" }
            div { class: "input-group",
                input { class: "form-control", value: "{name}", placeholder: "Name",
                    oninput: move |e: Event<FormData>| { let mut name = name; name.set(e.value()); } }
                select { class: "form-control", value: "{kind}",
                    onchange: move |e: Event<FormData>| { let mut kind = kind; kind.set(e.value()); },
                    for opt in kinds.read().iter() {
                        option { key: "{opt.value}", value: "{opt.value}", "{opt.label}" }
                    }
                }
                input { class: "form-control", value: "{path}", placeholder: "Folder (e.g. /media/movies)",
                    oninput: move |e: Event<FormData>| { let mut path = path; path.set(e.value()); } }
                div { class: "input-group-append",
                    button { class: "btn btn-primary", disabled: saving(), onclick: submit, "Add" }
                }
            }
        }
    }
}
