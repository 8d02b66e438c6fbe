use sauron::{
    html::{attributes::*, *},
    prelude::*,
};
use shared::{DateGroup, Todo, View, NO_DUE_DATE};

use crate::form::{
    date_choices, day_options, month_options, year_options, TodoForm, DAY_PLACEHOLDER,
    MONTH_PLACEHOLDER, YEAR_PLACEHOLDER,
};
use crate::{Model, Msg, MODAL_LAYER_ID};

const FIELD_CLASS: &str = "w-full px-3 py-2 bg-ctp-surface0 border border-ctp-surface2 rounded-md text-ctp-text placeholder-ctp-subtext0 focus:outline-none focus:ring-2 focus:ring-ctp-blue focus:border-transparent";

impl Model {
    pub(crate) fn view_page(&self) -> Node<Msg> {
        div(
            [class("min-h-screen flex bg-ctp-base text-ctp-text")],
            [self.view_sidebar(), self.view_main(), self.view_modal()],
        )
    }

    fn view_sidebar(&self) -> Node<Msg> {
        nav(
            [class("w-72 shrink-0 bg-ctp-mantle border-r border-ctp-surface0 px-4 py-6 space-y-6")],
            [
                div([], [
                    self.sidebar_header("All Todos", self.state.all_count(), View::AllTodos),
                    self.sidebar_groups(self.state.todos_by_date(), View::AllTodosSubgroup),
                ]),
                div([], [
                    self.sidebar_header(
                        "Completed",
                        self.state.completed_count(),
                        View::CompletedTodos,
                    ),
                    self.sidebar_groups(
                        self.state.done_todos_by_date(),
                        View::CompletedTodosSubgroup,
                    ),
                ]),
            ],
        )
    }

    fn sidebar_header(&self, heading: &'static str, count: usize, target: View) -> Node<Msg> {
        let is_active = self.state.view() == &target;
        div(
            [
                class(&format!(
                    "flex items-center justify-between px-3 py-2 rounded-md cursor-pointer font-semibold {}",
                    if is_active {
                        "bg-ctp-blue text-ctp-base"
                    } else {
                        "text-ctp-text hover:bg-ctp-surface0"
                    }
                )),
                on_click(move |_| Msg::NavigateTo(target.clone())),
            ],
            [
                span([], [text(heading)]),
                span([class("text-sm px-2 rounded-full bg-ctp-surface1")], [text(count)]),
            ],
        )
    }

    fn sidebar_groups(&self, group: &DateGroup, to_view: fn(String) -> View) -> Node<Msg> {
        ul(
            [class("mt-2 space-y-1")],
            group
                .iter()
                .map(|bucket| {
                    let target = to_view(bucket.key.clone());
                    let is_active = self.state.view() == &target;
                    li(
                        [
                            key(bucket.key.clone()),
                            class(&format!(
                                "flex items-center justify-between px-3 py-1 rounded-md cursor-pointer text-sm {}",
                                if is_active {
                                    "bg-ctp-surface1 text-ctp-blue"
                                } else {
                                    "text-ctp-subtext1 hover:bg-ctp-surface0"
                                }
                            )),
                            on_click(move |_| Msg::NavigateTo(target.clone())),
                        ],
                        [
                            span([], [text(&bucket.key)]),
                            span([class("text-ctp-overlay1")], [text(bucket.ids.len())]),
                        ],
                    )
                })
                .collect::<Vec<_>>(),
        )
    }

    fn view_main(&self) -> Node<Msg> {
        let current = self.state.current();
        div(
            [class("flex-1 max-w-4xl px-8 py-6")],
            [
                header([class("flex items-center gap-3 mb-6 pb-4 border-b border-ctp-surface0")], [
                    h1([class("text-2xl font-bold text-ctp-text")], [text(&current.title)]),
                    span(
                        [class("bg-ctp-blue/20 text-ctp-blue px-2 py-1 rounded-full text-sm font-medium")],
                        [text(current.count)],
                    ),
                ]),
                button(
                    [
                        r#type("button"),
                        on_click(|_| Msg::OpenNewForm),
                        class("mb-4 text-ctp-blue hover:text-ctp-sapphire font-medium"),
                    ],
                    [text("+ Add new to do")],
                ),
                if current.selected.is_empty() {
                    p([class("text-ctp-subtext0")], [text("Nothing to show here.")])
                } else {
                    table([class("w-full")], [tbody(
                        [],
                        current
                            .selected
                            .iter()
                            .map(|todo| self.view_todo_row(todo))
                            .collect::<Vec<_>>(),
                    )])
                },
            ],
        )
    }

    fn view_todo_row(&self, todo: &Todo) -> Node<Msg> {
        let todo_id = todo.id;
        let is_loading = self.is_pending(todo_id);
        let label_text = if todo.due_date == NO_DUE_DATE {
            todo.title.clone()
        } else {
            format!("{} - {}", todo.title, todo.due_date)
        };

        tr(
            [
                key(todo_id.to_string()),
                class("border-b border-ctp-surface0 hover:bg-ctp-surface0/50"),
            ],
            [
                td(
                    [
                        class("py-3 px-2 cursor-pointer"),
                        on_click(move |_| Msg::ToggleComplete(todo_id)),
                    ],
                    [
                        input(
                            [
                                r#type("checkbox"),
                                checked(todo.completed),
                                disabled(is_loading),
                                class("mr-3 accent-ctp-green"),
                            ],
                            [],
                        ),
                        label(
                            [
                                class(&format!(
                                    "cursor-pointer hover:underline {}",
                                    if todo.completed {
                                        "line-through text-ctp-overlay1"
                                    } else {
                                        "text-ctp-text"
                                    }
                                )),
                                on_click(move |event| {
                                    event.stop_propagation();
                                    Msg::OpenEditForm(todo_id)
                                }),
                            ],
                            [text(&label_text)],
                        ),
                    ],
                ),
                td(
                    [
                        class("py-3 px-2 w-10 text-right cursor-pointer"),
                        on_click(move |_| Msg::DeleteTodo(todo_id)),
                    ],
                    [if is_loading { text("⏳") } else { text("🗑️") }],
                ),
            ],
        )
    }

    fn view_modal(&self) -> Node<Msg> {
        let Some(form) = &self.form else {
            return span([], []);
        };

        div([], [
            div(
                [
                    id(MODAL_LAYER_ID),
                    class("fixed inset-0 bg-ctp-crust/70"),
                    on_click(|_| Msg::CloseModal),
                ],
                [],
            ),
            div(
                [class("fixed top-24 left-1/2 -translate-x-1/2 w-full max-w-lg p-6 bg-ctp-surface1 rounded-lg border border-ctp-surface2 space-y-4")],
                [
                    input(
                        [
                            r#type("text"),
                            placeholder("Item 1"),
                            value(&form.title),
                            on_input(|event| Msg::SetTitle(event.value())),
                            class(FIELD_CLASS),
                        ],
                        [],
                    ),
                    div([class("flex gap-2")], [
                        date_select(&form.day, DAY_PLACEHOLDER, day_options(), Msg::SetDay),
                        date_select(&form.month, MONTH_PLACEHOLDER, month_options(), Msg::SetMonth),
                        date_select(&form.year, YEAR_PLACEHOLDER, year_options(), Msg::SetYear),
                    ]),
                    textarea(
                        [
                            placeholder("Description"),
                            value(&form.description),
                            on_input(|event| Msg::SetDescription(event.value())),
                            class(&format!("{} h-24 resize-y", FIELD_CLASS)),
                        ],
                        [],
                    ),
                    self.view_modal_buttons(form),
                ],
            ),
        ])
    }

    fn view_modal_buttons(&self, form: &TodoForm) -> Node<Msg> {
        let is_loading = form.editing.is_some_and(|id| self.is_pending(id));
        div([class("flex gap-2")], [
            button(
                [
                    r#type("button"),
                    on_click(|_| Msg::SubmitForm),
                    disabled(is_loading),
                    class("bg-ctp-blue hover:bg-ctp-sapphire text-ctp-base font-medium px-6 py-2 rounded-md transition-colors duration-200"),
                ],
                [text("Save")],
            ),
            button(
                [
                    r#type("button"),
                    on_click(|_| Msg::MarkComplete),
                    disabled(is_loading),
                    class("bg-ctp-green hover:bg-ctp-teal text-ctp-base font-medium px-6 py-2 rounded-md transition-colors duration-200"),
                ],
                [text("Mark As Complete")],
            ),
        ])
    }
}

fn date_select(
    current: &str,
    placeholder_text: &'static str,
    choices: Vec<String>,
    to_msg: fn(String) -> Msg,
) -> Node<Msg> {
    let is_unset = current.is_empty() || current == placeholder_text;
    let mut options = vec![option(
        [value(placeholder_text), selected(is_unset)],
        [text(placeholder_text)],
    )];
    options.extend(
        date_choices(choices, current, placeholder_text)
            .into_iter()
            .map(|(choice, is_current)| {
                option([value(choice.clone()), selected(is_current)], [text(choice)])
            }),
    );

    select(
        [
            class(FIELD_CLASS),
            on_input(move |event| to_msg(event.value())),
        ],
        options,
    )
}
