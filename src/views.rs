use maud::{html, Markup, DOCTYPE};
use serde_json::json;

use crate::controller::{Alert, ViewState, DELETE_PROMPT};
use crate::models::Todo;

pub const LOADING_MESSAGE: &str = "불러오는 중...";
pub const EMPTY_MESSAGE: &str = "할 일이 없습니다.";

// === Page ===
pub fn page(view: &ViewState) -> Markup {
    html! {
        (DOCTYPE)
        html lang="ko" {
            head {
                meta charset="utf-8";
                title { "Todo List" }
                script src="https://unpkg.com/htmx.org@1.9.10" {}
                script src="https://cdn.tailwindcss.com" {}
            }
            body class="min-h-screen flex items-center justify-center bg-slate-100 p-4" {
                div class="w-full max-w-xl bg-white rounded-2xl shadow-lg p-6" {
                    h1 class="text-2xl font-bold mb-4 text-center text-slate-800" { "Todo List" }
                    (app(view))
                }
            }
        }
    }
}

// === Components ===
/// Everything below the heading; the unit every interaction swaps.
pub fn app(view: &ViewState) -> Markup {
    html! {
        section id="todo-app" {
            (new_todo_form(view))
            (todo_list(view))
            @if let Some(alert) = &view.alert {
                (alert_dialog(alert))
            }
        }
    }
}

fn new_todo_form(view: &ViewState) -> Markup {
    let label = if view.adding { "추가 중..." } else { "추가" };
    html! {
        form class="flex gap-2 mb-4" hx-put="/create_todo" hx-target="#todo-app" hx-swap="outerHTML" hx-disabled-elt="find button" {
            input class="flex-1 border border-slate-300 rounded-lg px-3 py-2 focus:outline-none focus:ring-2 focus:ring-blue-500"
                type="text" name="title" placeholder="할 일을 입력하세요." value=(view.input);
            button class="px-4 py-2 rounded-lg bg-blue-600 text-white font-medium disabled:opacity-60 disabled:cursor-not-allowed hover:bg-blue-700 transition"
                type="submit" disabled[view.adding] { (label) }
        }
    }
}

fn todo_list(view: &ViewState) -> Markup {
    html! {
        @if view.loading {
            p class="text-center text-slate-500" hx-get="/todos" hx-trigger="load" hx-target="#todo-app" hx-swap="outerHTML" {
                (LOADING_MESSAGE)
            }
        } @else if view.todos.is_empty() {
            p class="text-center text-slate-400" { (EMPTY_MESSAGE) }
        } @else {
            ul class="space-y-2 max-h-96 overflow-y-auto" {
                @for todo in &view.todos {
                    (todo_row(todo))
                }
            }
        }
    }
}

// a single line item in the todo list
fn todo_row(todo: &Todo) -> Markup {
    let toggle = json!({ "id": todo.id, "completed": !todo.completed }).to_string();
    let remove = json!({ "id": todo.id, "confirmed": true }).to_string();
    let label_class = if todo.completed {
        "flex-1 line-through text-slate-400"
    } else {
        "flex-1 text-slate-800"
    };
    html! {
        li class="flex items-center gap-2 border border-slate-200 rounded-lg px-3 py-2" {
            input type="checkbox" class="h-4 w-4" checked[todo.completed]
                hx-post="/toggle_todo" hx-vals=(toggle) hx-target="#todo-app" hx-swap="outerHTML";
            span class=(label_class) { (todo.title) }
            button class="text-sm text-red-500 hover:text-red-700"
                hx-delete="/remove_todo" hx-confirm=(DELETE_PROMPT) hx-vals=(remove) hx-target="#todo-app" hx-swap="outerHTML" { "삭제" }
        }
    }
}

fn alert_dialog(alert: &Alert) -> Markup {
    html! {
        dialog open role="alertdialog" class="fixed inset-0 m-auto rounded-lg shadow-xl p-6" {
            p class="mb-4 text-slate-800" { (alert.message()) }
            form method="dialog" class="text-right" {
                button class="px-4 py-2 rounded-lg bg-blue-600 text-white" { "확인" }
            }
        }
    }
}
