//! Terminal front-end for the sidebar: search, nearby view, breadcrumbs,
//! markup and an interactive prompt

use anyhow::{Context, Result, bail};
use colored::*;
use std::{
    io::Write,
    path::Path,
    time::Duration,
};
use terminal_size::{Width, terminal_size};
use tokio::io::{AsyncBufReadExt, BufReader};

use docnav::{
    IndexLoader, NavConfig, PageContext, SearchIndex, SidebarController, SidebarView, ViewMode,
    index::IndexBuilder,
    navigator::nearby_view,
    page::breadcrumb_links,
    render::{LinkDescriptor, NO_RESULTS_MESSAGE},
};

/// Get the current terminal width, defaulting to 80 if unable to detect
fn get_terminal_width() -> usize {
    if let Some((Width(w), _)) = terminal_size() {
        w as usize
    } else {
        80
    }
}

fn separator() -> String {
    "─".repeat(get_terminal_width().clamp(20, 60))
}

fn loader(docs: &Path, config: &NavConfig) -> IndexLoader {
    IndexLoader::for_docs(docs, &config.index_path)
}

async fn load_strict(docs: &Path, config: &NavConfig) -> Result<SearchIndex> {
    let loader = loader(docs, config);
    loader
        .try_load()
        .await
        .with_context(|| format!("Search index unavailable at {}", loader.path().display()))
}

fn print_link(link: &LinkDescriptor) {
    if link.active {
        println!("  {} {} {}", "▸".cyan(), link.label.green().bold(), link.href.dimmed());
    } else {
        println!("  {} {} {}", "•".cyan(), link.label.green(), link.href.dimmed());
    }
}

/// Print a sidebar view the way the page would show it
fn print_view(view: &SidebarView) {
    match view {
        SidebarView::Nearby(groups) => {
            for group in groups {
                let chevron = if group.expanded { "▼" } else { "▶" };
                println!(
                    "{} {} ({})",
                    chevron.cyan(),
                    group.display_name.yellow(),
                    group.links.len()
                );
                if group.expanded {
                    group.links.iter().for_each(print_link);
                }
            }
        }
        SidebarView::Results(links) => {
            println!("{} Search Results ({})", "🔍".cyan(), links.len());
            links.iter().for_each(print_link);
        }
        SidebarView::NoResults => println!("  {} {}", "ℹ️".blue(), NO_RESULTS_MESSAGE.dimmed()),
    }
}

pub async fn search(docs: &Path, config: &NavConfig, query: &str) -> Result<()> {
    let query = query.trim();
    if query.is_empty() {
        bail!("Search query is empty");
    }

    let index = load_strict(docs, config).await?;
    // One extra match tells whether the cap actually cut anything off
    let mut matches = index.search_classes(query, config.result_cap + 1);
    let truncated = matches.len() > config.result_cap;
    matches.truncate(config.result_cap);

    let view = if matches.is_empty() {
        SidebarView::NoResults
    } else {
        SidebarView::Results(
            matches
                .iter()
                .map(|entry| LinkDescriptor::for_entry(entry, false))
                .collect(),
        )
    };

    println!();
    print_view(&view);
    if truncated {
        println!("\n  {} limited to {} results", "…".dimmed(), config.result_cap);
    }
    Ok(())
}

pub async fn nearby(docs: &Path, config: &NavConfig, title: &str) -> Result<()> {
    let index = load_strict(docs, config).await?;
    let page = PageContext::new(title, "");

    let Some(class_name) = page.current_class_name(config) else {
        bail!("Page title '{}' does not name a class", title);
    };
    let Some(view) = nearby_view(&index, class_name, config.nearby_mode) else {
        bail!("Class '{}' not found in search index", class_name);
    };

    println!("\n{} Classes near {}\n", "📦".cyan(), class_name.green().bold());
    print_view(&view);
    Ok(())
}

pub async fn breadcrumbs(docs: &Path, config: &NavConfig, title: &str) -> Result<()> {
    let index = load_strict(docs, config).await?;
    let page = PageContext::new(title, "");

    let Some(class_name) = page.current_class_name(config) else {
        bail!("Page title '{}' does not name a class", title);
    };
    let Some(class) = index.get_class(class_name) else {
        bail!("Class '{}' not found in search index", class_name);
    };

    let segments: Vec<&str> = class
        .package_path
        .split('.')
        .filter(|segment| !segment.is_empty())
        .collect();
    if segments.is_empty() {
        println!("  {} {} is in the default package", "ℹ️".blue(), class_name);
        return Ok(());
    }

    let trail: Vec<String> = breadcrumb_links(&segments)
        .iter()
        .map(|link| format!("{} {}", link.label.yellow(), link.href.dimmed()))
        .collect();
    println!("{} {}", trail.join(&format!(" {} ", "›".bright_black())), class_name.green().bold());
    Ok(())
}

/// Wait out the debounce delay so a scheduled filter has rendered
async fn wait_for_filter(controller: &SidebarController, delay: Duration) {
    while controller.is_filter_pending() {
        tokio::time::sleep(delay).await;
    }
}

pub async fn sidebar(docs: &Path, config: NavConfig, title: &str, query: Option<&str>) -> Result<()> {
    let loader = loader(docs, &config);
    let delay = config.debounce();
    let mut controller = SidebarController::new(config, PageContext::new(title, ""));
    controller.load(&loader).await;

    if let Some(query) = query {
        controller.on_input(query);
        wait_for_filter(&controller, delay).await;
    }

    println!("{}", controller.markup());
    Ok(())
}

fn print_state(controller: &SidebarController) {
    let navigator = controller.navigator();
    println!("{}", separator().bright_black());
    match navigator.view() {
        Some(view) => print_view(view),
        None if navigator.mode() == ViewMode::Static => {
            println!("  {} static sidebar", "ℹ️".blue())
        }
        None => println!("  {} static sidebar restored", "ℹ️".blue()),
    }
}

/// Interactive mode: each line is the new value of the search input
pub async fn interactive(docs: &Path, config: NavConfig, title: &str) -> Result<()> {
    let loader = loader(docs, &config);
    let delay = config.debounce();
    let mut controller = SidebarController::new(config, PageContext::new(title, ""));
    controller.load(&loader).await;

    println!("{}", "╔═══════════════════════════════════════════╗".cyan());
    println!("{}", "║   API Docs Sidebar                        ║".cyan());
    println!("{}", "╚═══════════════════════════════════════════╝".cyan());
    println!();
    println!("Type a query to search, an empty line to clear.");
    println!("  {} <package>  - Collapse or expand a package", ":toggle".green());
    println!("  {}            - Exit", ":q".green());
    print_state(&controller);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("{} ", "docnav>".blue().bold());
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        match line.trim() {
            ":q" | ":quit" => break,
            toggle if toggle.starts_with(":toggle") => {
                let package = toggle.trim_start_matches(":toggle").trim();
                if !controller.navigator().toggle_package(package) {
                    println!("{} Package '{}' is not shown", "⚠️".yellow(), package);
                    continue;
                }
            }
            _ => {
                controller.on_input(&line);
                wait_for_filter(&controller, delay).await;
            }
        }
        print_state(&controller);
    }

    println!("Goodbye! 👋");
    Ok(())
}

pub fn build_index(docs: &Path, out: &Path, verbose: bool) -> Result<()> {
    println!("{} Generating search index...", "🔄".cyan());

    let builder = IndexBuilder::new(docs);
    let entries = builder.build()?;
    builder.write(&entries, out)?;

    let classes = entries.iter().filter(|e| e.is_class()).count();
    if verbose {
        for entry in entries.iter().filter(|e| e.is_class()) {
            println!("  {} {} {}", "•".cyan(), entry.name.green(), entry.package_path.dimmed());
        }
    }

    println!(
        "{} Indexed {} classes ({} entries) into {}",
        "✅".green(),
        classes.to_string().bold(),
        entries.len(),
        out.display()
    );
    Ok(())
}
