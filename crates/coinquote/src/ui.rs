use coinquote_app::prelude::*;
use coinquote_client::{CatalogEntry, FIAT_CURRENCIES};
use colored::Colorize;
use dialoguer::{theme::ColorfulTheme, FuzzySelect, Select};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

const PLACEHOLDER: &str = "-- select --";

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////
//
// Surface
//
////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Terminal rendition of the form: crypto options are kept for the prompt, the loading
/// indicator and the notification are spinners, a quote is printed as a block of lines.
#[derive(Default)]
pub struct TerminalSurface {
    options: Mutex<Vec<CatalogEntry>>,
    spinner: Mutex<Option<ProgressBar>>,
    notice: Mutex<Option<ProgressBar>>,
}

impl TerminalSurface {
    pub fn options(&self) -> Vec<CatalogEntry> {
        lock(&self.options).clone()
    }
}

impl Surface for TerminalSurface {
    fn populate(&self, entries: &[CatalogEntry]) {
        lock(&self.options).extend_from_slice(entries);
    }

    fn render(&self, view: &View) {
        // clear whatever the region was showing
        if let Some(spinner) = lock(&self.spinner).take() {
            spinner.finish_and_clear();
        }

        match view {
            View::Idle => {}
            View::Loading => {
                *lock(&self.spinner) = Some(loading_spinner());
            }
            View::Quote(quote) => {
                println!();
                for line in quote.lines() {
                    println!("  {} {}", format!("{}:", line.label).bold(), line.value.green());
                }
                println!();
            }
        }
    }

    fn show_notice(&self, notice: &Notice) {
        *lock(&self.notice) = Some(notice_spinner(&notice.message));
    }

    fn dismiss_notice(&self) {
        if let Some(notice) = lock(&self.notice).take() {
            notice.finish_and_clear();
        }
    }
}

pub fn loading_spinner() -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap(),
    );
    pb.set_message("Fetching quote ...");
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

pub fn notice_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.red} {msg} [{elapsed}]")
            .unwrap(),
    );
    pb.set_message(message.red().bold().to_string());
    pb.enable_steady_tick(Duration::from_millis(250));
    pb
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////
//
// Prompts
//
////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    Currency,
    Crypto,
    Quote,
    Quit,
}

impl MenuItem {
    const ALL: [MenuItem; 4] = [
        MenuItem::Currency,
        MenuItem::Crypto,
        MenuItem::Quote,
        MenuItem::Quit,
    ];
}

/// Menu labels, showing the current selection next to each selector.
fn menu_labels(selection: &Selection) -> Vec<String> {
    let shown = |value: &str| match value.is_empty() {
        true => PLACEHOLDER.dimmed().to_string(),
        false => value.to_string(),
    };
    MenuItem::ALL
        .iter()
        .map(|item| match item {
            MenuItem::Currency => format!("Currency:       {}", shown(&selection.fiat_currency)),
            MenuItem::Crypto => format!("Cryptocurrency: {}", shown(&selection.crypto_symbol)),
            MenuItem::Quote => "Get quote".to_string(),
            MenuItem::Quit => "Quit".to_string(),
        })
        .collect()
}

/// The form itself. `Esc` counts as quitting.
pub fn menu(selection: &Selection) -> dialoguer::Result<MenuItem> {
    let choice = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Cryptocurrency quotes")
        .items(&menu_labels(selection))
        .default(2)
        .interact_opt()?;

    Ok(choice.map_or(MenuItem::Quit, |i| MenuItem::ALL[i]))
}

/// `Some("")` when the placeholder is picked, `None` when cancelled.
pub fn choose_fiat() -> dialoguer::Result<Option<String>> {
    let items: Vec<String> = std::iter::once(PLACEHOLDER.to_string())
        .chain(
            FIAT_CURRENCIES
                .iter()
                .map(|fiat| format!("{} | {}", fiat.code, fiat.name)),
        )
        .collect();

    let choice = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Choose your currency")
        .items(&items)
        .default(0)
        .interact_opt()?;

    Ok(choice.map(|i| match i {
        0 => String::new(),
        i => FIAT_CURRENCIES[i - 1].code.to_string(),
    }))
}

/// Same contract as [`choose_fiat`], over the loaded catalog.
pub fn choose_crypto(options: &[CatalogEntry]) -> dialoguer::Result<Option<String>> {
    let items: Vec<String> = std::iter::once(PLACEHOLDER.to_string())
        .chain(options.iter().map(catalog_line))
        .collect();

    let choice = FuzzySelect::with_theme(&ColorfulTheme::default())
        .with_prompt("Choose your cryptocurrency")
        .items(&items)
        .default(0)
        .interact_opt()?;

    Ok(choice.map(|i| match i {
        0 => String::new(),
        i => options[i - 1].symbol.clone(),
    }))
}

pub fn catalog_line(entry: &CatalogEntry) -> String {
    format!("{:>8} | {}", entry.symbol, entry.display_name)
}
