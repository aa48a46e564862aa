use std::rc::Rc;

use dioxus::prelude::*;

use crate::api::ApiClient;
use crate::components::Toaster;
use crate::config::AppConfig;
use crate::list::{ListOptions, ListView, PagedListController};
use crate::shared::types::{Role, Status, User, UserId};
use crate::utils::format::format_count;

fn role_badge(role: Role) -> &'static str {
    match role {
        Role::Admin => "bg-rose-700 text-rose-100",
        Role::Viewer => "bg-violet-600 text-violet-100",
        Role::Editor => "bg-pink-600 text-pink-100",
        Role::Unknown => "bg-gray-600 text-gray-100",
    }
}

fn status_badge(status: Status) -> &'static str {
    match status {
        Status::Active => "bg-green-800 text-green-100",
        Status::Inactive => "bg-red-800 text-red-100",
        Status::Pending => "bg-blue-600 text-blue-100",
        Status::Unknown => "bg-gray-600 text-gray-100",
    }
}

#[allow(non_snake_case)]
#[component]
pub fn UsersTable() -> Element {
    let api = use_context::<ApiClient>();
    let config = use_context::<AppConfig>();
    let toaster = use_context::<Toaster>();

    // mirrors the controller so the table re-renders on every transition
    let view = use_signal(ListView::<User>::default);
    let mut confirming = use_signal(|| Option::<UserId>::None);

    let ctrl = use_hook(move || {
        let options = ListOptions::new(config.page_limit, "user", "users");
        let ctrl = Rc::new(
            PagedListController::new(api.users(), toaster, options).with_observer(
                move |v: &ListView<User>| {
                    let mut view = view;
                    view.set(v.clone());
                },
            ),
        );
        let first = ctrl.clone();
        spawn(async move {
            first.load_page(1).await;
        });
        ctrl
    });

    let search = use_callback({
        let ctrl = ctrl.clone();
        move |term: String| ctrl.set_search_term(&term)
    });
    let go_to = use_callback({
        let ctrl = ctrl.clone();
        move |page: u32| {
            let ctrl = ctrl.clone();
            spawn(async move {
                ctrl.change_page(page).await;
            });
        }
    });
    let edit = use_callback({
        let ctrl = ctrl.clone();
        move |user: User| ctrl.request_edit(user)
    });
    let close_edit = use_callback({
        let ctrl = ctrl.clone();
        move |_: ()| ctrl.clear_edit()
    });
    let ask_delete = use_callback(move |id: UserId| confirming.set(Some(id)));
    let cancel_delete = use_callback(move |_: ()| confirming.set(None));
    let confirm_delete = use_callback({
        let ctrl = ctrl.clone();
        move |id: UserId| {
            // the inline Yes/No prompt is the confirmation gate
            let approved = confirming.peek().as_ref() == Some(&id);
            confirming.set(None);
            let ctrl = ctrl.clone();
            spawn(async move {
                ctrl.request_delete(&id, move || approved).await;
            });
        }
    });

    let v = view.read().clone();
    let pending = confirming.read().clone();
    let prev_page = v.current_page.saturating_sub(1);
    let next_page = v.current_page.saturating_add(1);
    let pager_btn = |enabled: bool| {
        if enabled {
            "p-2 rounded-lg bg-gray-700 text-gray-200 hover:bg-gray-600"
        } else {
            "p-2 rounded-lg bg-gray-700 text-gray-500 cursor-not-allowed"
        }
    };

    rsx! {
        div { class: "bg-gray-800/50 backdrop-blur-md shadow-lg rounded-xl p-6 border border-gray-700",
            div { class: "flex justify-between items-center mb-6",
                h2 { class: "text-xl font-semibold text-gray-100", "Users" }
                div { class: "flex items-center gap-3",
                    if v.loading {
                        span { class: "text-xs text-gray-400 animate-pulse", "Loading..." }
                    }
                    input {
                        r#type: "text",
                        placeholder: "Search this page...",
                        title: "Only the users on the current page are searched",
                        class: "bg-gray-700 text-white placeholder-gray-400 rounded-lg px-4 py-2 focus:outline-none focus:ring-2 focus:ring-blue-500",
                        value: "{v.search_term}",
                        oninput: move |e| search.call(e.value()),
                    }
                }
            }

            if let Some(user) = &v.editing {
                div { class: "mb-4 flex items-center justify-between rounded-lg border border-indigo-700 bg-indigo-900/40 px-4 py-2 text-sm text-indigo-100",
                    span { "Editing {user.name} ({user.email})" }
                    button { class: "text-indigo-300 hover:text-indigo-200", onclick: move |_| close_edit.call(()), "Close" }
                }
            }

            if let Some(err) = &v.error {
                div { class: "mb-4 text-sm text-red-400", "{err}" }
            }

            div { class: "overflow-x-auto",
                table { class: "min-w-full divide-y divide-gray-700",
                    thead {
                        tr {
                            for heading in ["Name", "Email", "Role", "Status", "Actions"] {
                                th { class: "px-6 py-3 text-left text-xs font-medium text-gray-400 uppercase tracking-wider", "{heading}" }
                            }
                        }
                    }
                    tbody { class: "divide-y divide-gray-700",
                        if v.items.is_empty() {
                            tr {
                                td { colspan: "5", class: "text-center text-gray-400 py-4", "No users found." }
                            }
                        }
                        for user in v.items.iter() {
                            UserRow {
                                key: "{user.id}",
                                user: user.clone(),
                                confirming: pending.as_ref() == Some(&user.id),
                                on_edit: edit,
                                on_delete: ask_delete,
                                on_confirm: confirm_delete,
                                on_cancel: cancel_delete,
                            }
                        }
                    }
                }
            }

            div { class: "mt-4 flex items-center justify-between px-4",
                div { class: "text-sm text-gray-400",
                    "Showing page {v.current_page} of {v.total_pages} ({format_count(v.total_count)} total users)"
                }
                div { class: "flex space-x-2",
                    button {
                        class: pager_btn(v.has_previous()),
                        disabled: !v.has_previous(),
                        onclick: move |_| go_to.call(prev_page),
                        "‹"
                    }
                    button {
                        class: pager_btn(v.has_next()),
                        disabled: !v.has_next(),
                        onclick: move |_| go_to.call(next_page),
                        "›"
                    }
                }
            }
        }
    }
}

#[allow(non_snake_case)]
#[component]
fn UserRow(
    user: User,
    confirming: bool,
    on_edit: EventHandler<User>,
    on_delete: EventHandler<UserId>,
    on_confirm: EventHandler<UserId>,
    on_cancel: EventHandler<()>,
) -> Element {
    let initial = user.name.chars().next().map(String::from).unwrap_or_default();
    let edit_target = user.clone();
    let delete_id = user.id.clone();
    let confirm_id = user.id.clone();

    rsx! {
        tr {
            td { class: "px-6 py-4 whitespace-nowrap",
                div { class: "flex items-center",
                    div { class: "h-10 w-10 rounded-full bg-gradient-to-r from-purple-400 to-blue-500 flex items-center justify-center text-white font-semibold",
                        "{initial}"
                    }
                    div { class: "ml-4 text-sm font-medium text-gray-100", "{user.name}" }
                }
            }
            td { class: "px-6 py-4 whitespace-nowrap text-sm text-gray-300", "{user.email}" }
            td { class: "px-6 py-4 whitespace-nowrap",
                span { class: "px-2 inline-flex text-xs leading-5 font-semibold rounded-full {role_badge(user.role)}",
                    "{user.role.as_str()}"
                }
            }
            td { class: "px-6 py-4 whitespace-nowrap",
                span { class: "px-2 inline-flex text-xs leading-5 font-semibold rounded-full {status_badge(user.status)}",
                    "{user.status.as_str()}"
                }
            }
            td { class: "px-6 py-4 whitespace-nowrap text-sm text-gray-300",
                if confirming {
                    span { class: "mr-2 text-gray-400", "Delete this user?" }
                    button { class: "text-red-400 hover:text-red-300 mr-2", onclick: move |_| on_confirm.call(confirm_id.clone()), "Yes" }
                    button { class: "text-gray-400 hover:text-gray-300", onclick: move |_| on_cancel.call(()), "No" }
                } else {
                    button { class: "text-indigo-400 hover:text-indigo-300 mr-2", onclick: move |_| on_edit.call(edit_target.clone()), "Edit" }
                    button { class: "text-red-400 hover:text-red-300", onclick: move |_| on_delete.call(delete_id.clone()), "Delete" }
                }
            }
        }
    }
}
