// SPDX-FileCopyrightText: 2026 Msgdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `msgdesk shell` command implementation.
//!
//! Launches an interactive console with colored output and readline
//! history. Rows are addressed by the number shown in the current listing.
//! Every write reloads the full snapshot before the next prompt.

use std::io::IsTerminal;

use colored::Colorize;
use msgdesk_config::MsgdeskConfig;
use msgdesk_console::{Console, ConsoleError, MainTab};
use msgdesk_core::{Channel, DeskError, MessageTab};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing::debug;

use crate::render;
use crate::store;

const HELP: &str = "  Messages
    list                      show the current tab
    tab <name>                sms_broadcast, sms_funnel, email_broadcast, email_funnel
    search [term]             filter by name; no term clears
    category [name]           filter by category; no name clears
    show <n>                  full detail of row n
    new                       create a message on the current tab
    edit <n>                  edit row n
    copy <n>                  duplicate row n
    delete <n>                delete row n
    send <n>                  mark broadcast n as sent

  Categories
    categories [sms|email]    show the category list
    cat-new                   create a category
    cat-edit <n>              edit category n
    cat-delete <n>            delete category n

  Other
    messages                  back to the message list
    reload                    re-read every table
    help                      this text
    quit                      leave the shell";

/// A parsed shell command.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Help,
    Quit,
    Reload,
    List,
    Messages,
    Tab(MessageTab),
    Search(String),
    Category(String),
    Show(usize),
    New,
    Edit(usize),
    Copy(usize),
    Delete(usize),
    Send(usize),
    Categories(Option<Channel>),
    CategoryNew,
    CategoryEdit(usize),
    CategoryDelete(usize),
}

fn parse_command(line: &str) -> Result<Command, String> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let row = |rest: &str| -> Result<usize, String> {
        rest.parse::<usize>()
            .map_err(|_| format!("`{word}` needs a row number"))
    };

    match word.to_lowercase().as_str() {
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" | "/quit" | "/exit" => Ok(Command::Quit),
        "reload" => Ok(Command::Reload),
        "list" | "ls" => Ok(Command::List),
        "messages" => Ok(Command::Messages),
        "tab" => rest
            .parse::<MessageTab>()
            .map(Command::Tab)
            .map_err(|_| format!("unknown tab `{rest}`")),
        "search" => Ok(Command::Search(rest.to_string())),
        "category" => Ok(Command::Category(rest.to_string())),
        "show" => row(rest).map(Command::Show),
        "new" => Ok(Command::New),
        "edit" => row(rest).map(Command::Edit),
        "copy" => row(rest).map(Command::Copy),
        "delete" | "rm" => row(rest).map(Command::Delete),
        "send" => row(rest).map(Command::Send),
        "categories" | "cats" => {
            if rest.is_empty() {
                Ok(Command::Categories(None))
            } else {
                rest.parse::<Channel>()
                    .map(|c| Command::Categories(Some(c)))
                    .map_err(|_| format!("unknown channel `{rest}`"))
            }
        }
        "cat-new" => Ok(Command::CategoryNew),
        "cat-edit" => row(rest).map(Command::CategoryEdit),
        "cat-delete" => row(rest).map(Command::CategoryDelete),
        _ => Err(format!("unknown command `{word}`; type `help`")),
    }
}

/// Single-line editing of multi-line text: newlines show as `\n` and
/// backslashes as `\\`.
fn escape_newlines(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            _ => out.push(c),
        }
    }
    out
}

/// Inverse of [`escape_newlines`]. A backslash before any other character,
/// or at the end, is kept as typed.
fn unescape_newlines(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.peek() {
            Some('n') => {
                chars.next();
                out.push('\n');
            }
            Some('\\') => {
                chars.next();
                out.push('\\');
            }
            _ => out.push('\\'),
        }
    }
    out
}

/// Runs the `msgdesk shell` interactive console.
pub async fn run_shell(config: &MsgdeskConfig) -> Result<(), DeskError> {
    let store = store::open_store(config).await?;
    let console = Console::new(store.clone(), config.console.default_tab);

    let rl = DefaultEditor::new()
        .map_err(|e| DeskError::Internal(format!("failed to initialize readline: {e}")))?;

    let mut shell = Shell {
        console,
        rl,
        use_color: std::io::stdout().is_terminal(),
    };

    println!("{}", "msgdesk shell".bold().green());
    println!("Type {} for commands, {} to exit.\n", "help".yellow(), "quit".yellow());

    shell.reload().await;
    shell.print_view();

    loop {
        let prompt = shell.prompt();
        match shell.rl.readline(&prompt) {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                let _ = shell.rl.add_history_entry(&line);
                match parse_command(&line) {
                    Ok(Command::Quit) => break,
                    Ok(command) => shell.dispatch(command).await,
                    Err(message) => eprintln!("{}: {message}", "error".red()),
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("{}: {e}", "error".red());
                break;
            }
        }
    }

    store.shutdown().await?;
    println!("{}", "goodbye".dimmed());
    Ok(())
}

struct Shell {
    console: Console,
    rl: DefaultEditor,
    use_color: bool,
}

impl Shell {
    fn prompt(&self) -> String {
        let state = self.console.state();
        let context = match state.main_tab {
            MainTab::Messages => state.message_tab.label().to_string(),
            MainTab::Categories => format!("{} Categories", state.category_tab.label()),
        };
        if self.use_color {
            format!("{} [{}]> ", "msgdesk".green(), context.cyan())
        } else {
            format!("msgdesk [{context}]> ")
        }
    }

    async fn dispatch(&mut self, command: Command) {
        debug!(?command, "shell command");
        match command {
            Command::Help => println!("{HELP}\n"),
            Command::Quit => {}
            Command::Reload => {
                self.reload().await;
                self.print_view();
            }
            Command::List => self.print_view(),
            Command::Messages => {
                self.console.set_main_tab(MainTab::Messages);
                self.print_view();
            }
            Command::Tab(tab) => {
                self.console.set_main_tab(MainTab::Messages);
                self.console.set_message_tab(tab);
                self.print_view();
            }
            Command::Search(term) => {
                self.console.set_search(term);
                self.print_view();
            }
            Command::Category(name) => self.select_category(name),
            Command::Show(n) => self.show(n),
            Command::New => {
                self.console.open_create_message();
                self.submit_message().await;
            }
            Command::Edit(n) => {
                if let Some(id) = self.message_id(n) {
                    match self.console.open_edit_message(&id) {
                        Ok(()) => self.submit_message().await,
                        Err(e) => self.alert(&e),
                    }
                }
            }
            Command::Copy(n) => {
                if let Some(id) = self.message_id(n) {
                    let result = self.console.copy_message(&id).await;
                    self.report(result, "Message copied");
                }
            }
            Command::Delete(n) => {
                if let Some(id) = self.message_id(n)
                    && self.confirm("Are you sure you want to delete this message?")
                {
                    let result = self.console.delete_message(&id).await;
                    self.report(result, "Message deleted");
                }
            }
            Command::Send(n) => {
                if let Some(id) = self.message_id(n) {
                    self.send(&id).await;
                }
            }
            Command::Categories(channel) => {
                self.console.set_main_tab(MainTab::Categories);
                if let Some(channel) = channel {
                    self.console.set_category_tab(channel);
                }
                self.print_view();
            }
            Command::CategoryNew => {
                self.console.open_create_category();
                self.submit_category().await;
            }
            Command::CategoryEdit(n) => {
                if let Some(id) = self.category_id(n) {
                    match self.console.open_edit_category(&id) {
                        Ok(()) => self.submit_category().await,
                        Err(e) => self.alert(&e),
                    }
                }
            }
            Command::CategoryDelete(n) => {
                if let Some(id) = self.category_id(n)
                    && self.confirm("Are you sure you want to delete this category?")
                {
                    let result = self.console.delete_category(&id).await;
                    self.report(result, "Category deleted");
                }
            }
        }
    }

    // --- Output ---

    fn print_view(&self) {
        let state = self.console.state();
        match state.main_tab {
            MainTab::Messages => {
                let mut heading = state.message_tab.label().to_string();
                if !state.search.is_empty() {
                    heading.push_str(&format!("  search: \"{}\"", state.search));
                }
                if !state.selected_category.is_empty() {
                    heading.push_str(&format!("  category: {}", state.selected_category));
                }
                println!("\n  {}\n", self.bold(&heading));
                let rows = state.visible_messages();
                let funnels = state.funnel_map();
                print!(
                    "{}",
                    render::message_table(state.message_tab, &rows, &funnels, self.use_color)
                );
            }
            MainTab::Categories => {
                let heading = format!("{} Categories", state.category_tab.label());
                println!("\n  {}\n", self.bold(&heading));
                print!(
                    "{}",
                    render::category_table(state.visible_categories(), self.use_color)
                );
            }
        }
        println!();
    }

    fn show(&self, n: usize) {
        let state = self.console.state();
        let rows = state.visible_messages();
        match n.checked_sub(1).and_then(|i| rows.get(i)) {
            Some(record) => {
                let funnels = state.funnel_map();
                println!();
                print!(
                    "{}",
                    render::message_detail(record, funnels.get(record.id.as_str()), self.use_color)
                );
                println!();
            }
            None => eprintln!("{}: no message #{n}", "error".red()),
        }
    }

    fn bold(&self, text: &str) -> String {
        if self.use_color {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn alert(&self, error: &ConsoleError) {
        eprintln!("{}: {error}", "error".red());
    }

    fn report(&self, result: Result<(), ConsoleError>, done: &str) {
        match result {
            Ok(()) => {
                println!("{}", done.green());
                self.print_view();
            }
            Err(e) => self.alert(&e),
        }
    }

    // --- Input ---

    fn ask(&mut self, label: &str, initial: &str) -> Result<String, ReadlineError> {
        self.rl.readline_with_initial(&format!("  {label}: "), (initial, ""))
    }

    fn confirm(&mut self, question: &str) -> bool {
        match self.rl.readline(&format!("{question} [y/N] ")) {
            Ok(answer) => matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"),
            Err(_) => false,
        }
    }

    fn message_id(&self, n: usize) -> Option<String> {
        let rows = self.console.state().visible_messages();
        let found = n.checked_sub(1).and_then(|i| rows.get(i)).map(|m| m.id.clone());
        if found.is_none() {
            eprintln!("{}: no message #{n}", "error".red());
        }
        found
    }

    fn category_id(&self, n: usize) -> Option<String> {
        let categories = self.console.state().visible_categories();
        let found = n
            .checked_sub(1)
            .and_then(|i| categories.get(i))
            .map(|c| c.id.clone());
        if found.is_none() {
            eprintln!("{}: no category #{n}", "error".red());
        }
        found
    }

    fn select_category(&mut self, name: String) {
        let known = name.is_empty()
            || self
                .console
                .state()
                .category_options()
                .iter()
                .any(|c| c.name == name);
        if known {
            self.console.set_selected_category(name);
            self.print_view();
        } else {
            eprintln!("{}: no category named `{name}` on this tab", "error".red());
        }
    }

    async fn reload(&mut self) {
        if let Err(e) = self.console.reload().await {
            self.alert(&e);
        }
    }

    // --- Message dialog ---

    /// Prompts for the open message form's fields, pre-filled with its
    /// current values. Errors when the user interrupts the prompt.
    fn fill_message_form(&mut self) -> Result<(), ReadlineError> {
        let state = self.console.state();
        let Some(dialog) = &state.message_dialog else {
            return Ok(());
        };
        let mut form = dialog.form.clone();
        let options: Vec<String> = state
            .category_options()
            .iter()
            .map(|c| c.name.clone())
            .collect();
        let title = if dialog.editing.is_some() { "Edit" } else { "Create" };
        println!("\n  {}", self.bold(&format!("{title} {}", state.message_tab.label())));

        form.content_name = self.ask("Content name", &form.content_name)?;
        loop {
            let category = self.ask("Category (blank for none)", &form.context_category)?;
            if category.is_empty() || options.contains(&category) {
                form.context_category = category;
                break;
            }
            eprintln!("  choose one of: {}", options.join(", "));
        }
        if form.channel() == Channel::Email {
            form.subject = self.ask("Subject", &form.subject)?;
        }
        let content = self.ask("Content (\\n for new line)", &escape_newlines(&form.content))?;
        form.content = unescape_newlines(&content);

        if let Some(target) = self.console.message_form_mut() {
            target.content_name = form.content_name;
            target.context_category = form.context_category;
            target.subject = form.subject;
            target.content = form.content;
        }
        Ok(())
    }

    async fn submit_message(&mut self) {
        loop {
            if self.fill_message_form().is_err() {
                self.console.cancel_message_dialog();
                println!("{}", "cancelled".dimmed());
                return;
            }
            match self.console.save_message().await {
                Ok(()) => {
                    println!("{}", "Message saved".green());
                    self.print_view();
                    return;
                }
                Err(e) => {
                    self.alert(&e);
                    if self.console.state().message_dialog.is_none() {
                        return;
                    }
                    if !self.confirm("Edit and try again?") {
                        self.console.cancel_message_dialog();
                        return;
                    }
                }
            }
        }
    }

    // --- Send confirmation ---

    async fn send(&mut self, id: &str) {
        let preview = match self.console.request_send(id) {
            Ok(record) => {
                let channel = record.channel().label();
                format!("Send \"{}\" to all {channel} recipients now?", record.content_name)
            }
            Err(e) => {
                self.alert(&e);
                return;
            }
        };
        if !self.confirm(&preview) {
            self.console.cancel_send();
            return;
        }
        loop {
            match self.console.confirm_send().await {
                Ok(()) => {
                    println!("{}", "Message sent".green());
                    self.print_view();
                    return;
                }
                Err(e) => {
                    self.alert(&e);
                    if self.console.state().pending_send.is_none() {
                        return;
                    }
                    if !self.confirm("Try sending again?") {
                        self.console.cancel_send();
                        return;
                    }
                }
            }
        }
    }

    // --- Category form ---

    fn fill_category_form(&mut self) -> Result<(), ReadlineError> {
        let state = self.console.state();
        let Some(dialog) = &state.category_dialog else {
            return Ok(());
        };
        let mut form = dialog.form.clone();
        let title = if dialog.editing.is_some() { "Edit" } else { "Create" };
        let heading = format!("{title} {} Category", state.category_tab.label());
        println!("\n  {}", self.bold(&heading));

        form.name = self.ask("Name", &form.name)?;
        form.description = self.ask("Description (optional)", &form.description)?;

        if let Some(target) = self.console.category_form_mut() {
            target.name = form.name;
            target.description = form.description;
        }
        Ok(())
    }

    async fn submit_category(&mut self) {
        loop {
            if self.fill_category_form().is_err() {
                self.console.cancel_category_form();
                println!("{}", "cancelled".dimmed());
                return;
            }
            match self.console.save_category().await {
                Ok(()) => {
                    println!("{}", "Category saved".green());
                    self.print_view();
                    return;
                }
                Err(e) => {
                    self.alert(&e);
                    if self.console.state().category_dialog.is_none() {
                        return;
                    }
                    if !self.confirm("Edit and try again?") {
                        self.console.cancel_category_form();
                        return;
                    }
                }
            }
        }
    }
}
