//! Reorderable list of US states and territories grouped by initial.
//!
//! A console host stands in for a recycling grid view: it keeps a pool of
//! text cells per reuse identifier and prints what it would display.
//!
//! Run with:
//! ```sh
//! RUST_LOG=horizon_datasource=debug cargo run -p horizon-datasource --example reorderable
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use horizon_datasource::prelude::*;
use horizon_datasource::SECTION_HEADER;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Default)]
struct TextCell {
    reuse_id: String,
    label: String,
}

#[derive(Default)]
struct ConsoleHost {
    templates: HashMap<ReuseId, TemplateSource>,
    pool: HashMap<ReuseId, Vec<TextCell>>,
}

impl ConsoleHost {
    fn recycle(&mut self, cell: TextCell) {
        self.pool
            .entry(ReuseId::new(cell.reuse_id.clone()))
            .or_default()
            .push(cell);
    }

    fn dequeue(&mut self, reuse_id: &ReuseId) -> TextCell {
        self.pool
            .get_mut(reuse_id)
            .and_then(Vec::pop)
            .unwrap_or_else(|| TextCell {
                reuse_id: reuse_id.to_string(),
                label: String::new(),
            })
    }
}

impl ViewHost for ConsoleHost {
    type View = TextCell;

    fn register_template(&mut self, source: &TemplateSource, reuse_id: &ReuseId, kind: Option<&str>) {
        println!(
            "register {} as {reuse_id} ({})",
            source.name(),
            kind.unwrap_or("cell")
        );
        self.templates.insert(reuse_id.clone(), source.clone());
    }

    fn dequeue_cell(&mut self, reuse_id: &ReuseId, _address: Address) -> TextCell {
        self.dequeue(reuse_id)
    }

    fn dequeue_supplementary(&mut self, _kind: &str, reuse_id: &ReuseId, _address: Address) -> TextCell {
        self.dequeue(reuse_id)
    }

    fn placeholder_supplementary(&mut self, _kind: &str, _address: Address) -> TextCell {
        TextCell::default()
    }
}

/// Routes interactive moves back into the engine's items.
struct Reorder;

impl DataSourceDelegate<String, TextCell> for Reorder {
    fn move_item(
        &self,
        items: &mut ItemStore<String>,
        from: Address,
        to: Address,
    ) -> Option<horizon_datasource::Result<()>> {
        Some(items.move_item(from, to))
    }
}

fn states() -> Vec<Vec<String>> {
    [
        &["Alaska", "Alabama", "Arkansas", "American Samoa", "Arizona"][..],
        &["California", "Colorado", "Connecticut"],
        &["District of Columbia", "Delaware"],
        &["Florida"],
        &["Georgia", "Guam"],
        &["Hawaii"],
        &["Iowa", "Idaho", "Illinois", "Indiana"],
    ]
    .iter()
    .map(|section| section.iter().map(|s| s.to_string()).collect())
    .collect()
}

fn render(engine: &mut BindingEngine<String, TextCell>, host: &mut ConsoleHost) -> Result<(), DataSourceError> {
    for section in 0..engine.section_count() {
        let header = engine.supplementary_view(host, SECTION_HEADER, Address::section_start(section))?;
        println!("{}", header.label);
        host.recycle(header);

        for index in 0..engine.item_count(section)? {
            let cell = engine.cell_for(host, Address::new(section, index))?;
            println!("  {}", cell.label);
            host.recycle(cell);
        }
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let initials: Vec<char> = states()
        .iter()
        .filter_map(|section| section.first().and_then(|s| s.chars().next()))
        .collect();

    let mut engine = BindingEngine::<String, TextCell>::builder()
        .items(states())
        .cell_configuration(
            CellConfiguration::new(LayoutTemplate::named("TextCell"))
                .with_presenter(|cell: &mut TextCell, state: &String| cell.label = state.clone()),
        )
        .supplementary(
            SupplementaryConfiguration::new(SECTION_HEADER, ViewClass::of::<TextCell>()).with_presenter(
                move |cell: &mut TextCell, section| {
                    cell.label = initials.get(section).map(char::to_string).unwrap_or_default();
                },
            ),
        )
        .delegate(Arc::new(Reorder))
        .build();

    let mut host = ConsoleHost::default();
    render(&mut engine, &mut host)?;

    // Drag "Alabama" to the end of the C section.
    let from = Address::new(0, 1);
    let to = Address::new(1, 3);
    if engine.can_move_item(from) && engine.move_item(from, to)? {
        println!("\nmoved {from} to {to}\n");
    }
    render(&mut engine, &mut host)?;

    Ok(())
}
