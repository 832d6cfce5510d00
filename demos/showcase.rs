//! Interactive tour of the widget set.
//!
//! `cargo run --example showcase [config.json]`. Logs go to `showcase.log`
//! so they stay off the alternate screen. `q` quits unless a field is being
//! edited; `ctrl+c` always quits.

use std::fs::File;
use std::sync::Mutex;

use kraken_imgui::{run, App, CrosstermBackend, Gui, GuiConfig, Marker, Table};
use tracing::info;

const INTERVALS: [&str; 7] = ["5m", "15m", "30m", "1h", "4h", "1d", "1w"];

trait View {
    fn render(&mut self, gui: &mut Gui);
}

struct InputView {
    input: String,
}

impl View for InputView {
    fn render(&mut self, gui: &mut Gui) {
        gui.start_row();
        gui.start_cell_with_header("Input");
        self.input = gui.input("Input:", &self.input, 30).text;
        gui.end_cell();
        gui.end_row();
    }
}

struct TickerView {
    interval: usize,
    steps: i64,
    toggle: bool,
    mode: usize,
    range: usize,
    symbol: String,
}

impl View for TickerView {
    fn render(&mut self, gui: &mut Gui) {
        gui.start_row();
        gui.start_cell_with_header("Ticker");
        gui.start_group();
        gui.text("Make some selections");
        self.interval = gui.selection("Interval:", &INTERVALS, self.interval);
        self.steps = gui.int_slider("Num:", 0, 100, self.steps, 10);
        self.toggle = gui.checkbox("Toggle Me", self.toggle);
        if gui.button("Reload") {
            info!(interval = INTERVALS[self.interval], steps = self.steps, "reload");
        }
        gui.end_group();
        self.mode = gui.radio("Mode:", &["Line", "Candle", "Bar"], self.mode);
        gui.end_cell();
        gui.end_row();

        gui.start_row();
        gui.start_cell();
        self.symbol = gui.input("Symbol:", &self.symbol, 30).text;
        self.range = gui.dropdown("Range:", &INTERVALS, self.range);
        gui.text(&format!("Selected range: {}", INTERVALS[self.range]));
        gui.end_cell();
        gui.end_row();
    }
}

struct TableView;

impl View for TableView {
    fn render(&mut self, gui: &mut Gui) {
        let mut table = Table::new().with_headers(["One", "Two", "Three", "Block"]);
        for i in 0..10 {
            let marker = if i < 5 { Marker::Negative } else { Marker::Positive };
            table
                .add_row()
                .text((i + 1).to_string())
                .number(i as f64 * 5.0, marker)
                .int(i + 1, Marker::None)
                .flag(i % 2 == 0);
        }

        gui.start_row();
        gui.start_cell_with_header("Table");
        gui.table(&table);
        gui.end_cell();
        gui.end_row();
    }
}

struct Showcase {
    views: Vec<Box<dyn View>>,
    active: usize,
}

impl App for Showcase {
    fn render(&mut self, gui: &mut Gui) {
        gui.begin_menu_bar();
        if gui.begin_menu("File") {
            for item in ["Open..", "Save", "Close"] {
                if gui.menu_item(item) {
                    info!(item, "file menu");
                }
            }
        }
        gui.end_menu();
        if gui.begin_menu("Views") {
            for (i, item) in ["InputView", "TickerView", "TableView"].into_iter().enumerate() {
                if gui.menu_item(item) {
                    self.active = i;
                }
            }
        }
        gui.end_menu();
        gui.end_menu_bar();

        self.views[self.active].render(gui);

        gui.start_row();
        gui.start_cell_with_header("Buttons");
        gui.text("Hello world");
        if gui.button("Press me") {
            info!("button pressed");
        }
        gui.text("Here is more text");
        if gui.button("Next button") {
            info!("next button pressed");
        }
        gui.end_cell();

        gui.start_cell();
        let debug = gui.button("Debug");
        gui.end_cell();
        gui.end_row();

        if debug {
            gui.debug();
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let log = File::create("showcase.log")?;
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_writer(Mutex::new(log))
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => GuiConfig::from_json(&std::fs::read_to_string(path)?)?,
        None => GuiConfig::default(),
    };

    let mut app = Showcase {
        views: vec![
            Box::new(InputView {
                input: String::new(),
            }),
            Box::new(TickerView {
                interval: 0,
                steps: 0,
                toggle: false,
                mode: 0,
                range: 0,
                symbol: "TESLA".to_string(),
            }),
            Box::new(TableView),
        ],
        active: 1,
    };
    let mut backend = CrosstermBackend::new();
    run(&mut app, &mut backend, config)?;
    Ok(())
}
