//! Property tests for formatting, grid access and cell measurement.

use kraken_imgui::{
    align, display_len, Align, Grid, Gui, GuiConfig, Identity, Layout, Style, WriteMode,
};
use proptest::prelude::*;

fn style_strategy() -> impl Strategy<Value = Style> {
    (0..Style::COUNT).prop_map(|i| Style::ALL[i])
}

fn op_strategy() -> impl Strategy<Value = (String, bool)> {
    ("[a-z]{0,8}", any::<bool>())
}

proptest! {
    #[test]
    fn align_pads_to_exact_width(text in "[a-zA-Z0-9 ]{0,12}", extra in 0usize..10) {
        let width = display_len(&text) + extra;
        for alignment in [Align::Left, Align::Right, Align::Center] {
            let out = align(&text, width, alignment);
            prop_assert_eq!(display_len(&out), width);
            prop_assert!(out.contains(text.as_str()));
        }
        prop_assert!(align(&text, width, Align::Left).starts_with(text.as_str()));
        prop_assert!(align(&text, width, Align::Right).ends_with(text.as_str()));
    }

    #[test]
    fn align_center_splits_floor_ceil(text in "[a-z]{1,10}", extra in 0usize..10) {
        let width = text.len() + extra;
        let out = align(&text, width, Align::Center);
        let lead = extra / 2;
        prop_assert_eq!(&out[..lead], " ".repeat(lead));
        prop_assert_eq!(&out[lead..lead + text.len()], text.as_str());
        prop_assert_eq!(&out[lead + text.len()..], " ".repeat(extra - lead));
    }

    #[test]
    fn grid_set_then_at_round_trips(
        w in 1u16..60,
        h in 1u16..30,
        fx in 0.0f64..1.0,
        fy in 0.0f64..1.0,
        ch in proptest::char::range('!', '~'),
        style in style_strategy(),
    ) {
        let mut grid = Grid::new(w, h);
        let x = (fx * w as f64) as i32;
        let y = (fy * h as f64) as i32;
        grid.set(x, y, ch, style);
        prop_assert_eq!(grid.at(x, y), (ch, style));
    }

    #[test]
    fn grid_out_of_range_is_blank(w in 1u16..20, h in 1u16..20, dx in 0i32..5, dy in 0i32..5) {
        let mut grid = Grid::new(w, h);
        let (x, y) = (w as i32 + dx, h as i32 + dy);
        grid.set(x, y, 'X', Style::Header);
        grid.set(-1 - dx, -1 - dy, 'X', Style::Header);
        prop_assert_eq!(grid.at(x, y), (' ', Style::None));
        prop_assert_eq!(grid.at(-1 - dx, -1 - dy), (' ', Style::None));
    }

    #[test]
    fn end_cell_measures_extent(ops in prop::collection::vec(op_strategy(), 1..12)) {
        let mut layout = Layout::new(1, 1);
        layout.start_row();
        layout.start_cell("");

        let (mut x, mut y) = (0i32, 0i32);
        let (mut width, mut height) = (0i32, 0i32);
        for (text, block) in &ops {
            let len = text.len() as i32;
            width = width.max(x + len + 1);
            height = height.max(y + 1);
            let mode = if *block { WriteMode::Block } else { WriteMode::Inline };
            layout.write(Identity::EMPTY, text, Style::None, mode);
            if *block {
                x = 0;
                y += 1;
            } else {
                x += len;
            }
        }
        layout.end_cell();

        let cell = &layout.cells()[0];
        prop_assert_eq!(cell.width, width);
        prop_assert_eq!(cell.height, height);
    }

    #[test]
    fn end_row_equalizes_heights(lines in prop::collection::vec(1usize..6, 1..5)) {
        let mut layout = Layout::new(1, 1);
        layout.start_row();
        for count in &lines {
            layout.start_cell("");
            for i in 0..*count {
                layout.write(Identity::EMPTY, &format!("line{i}"), Style::None, WriteMode::Block);
            }
            layout.end_cell();
        }
        layout.end_row();

        let tallest = *lines.iter().max().unwrap() as i32;
        prop_assert!(layout.cells().iter().all(|cell| cell.height == tallest));
        let bottoms: Vec<i32> = layout.cells().iter().map(|cell| cell.bottom()).collect();
        prop_assert!(bottoms.windows(2).all(|pair| pair[0] == pair[1]));
    }

    #[test]
    fn selection_wraps_for_any_length(n in 1usize..9) {
        let entries: Vec<String> = (0..n).map(|i| format!("e{i}")).collect();
        // "L " then the left arrow at x = 3; four-column slot; right arrow at x = 8
        let mut gui = Gui::new(30, 4);

        gui.set_pointer_event(3, 1);
        let mut index = 0;
        gui.frame(|g| index = g.selection("L", &entries, 0));
        prop_assert_eq!(index, n - 1);

        gui.set_pointer_event(8, 1);
        gui.frame(|g| index = g.selection("L", &entries, n - 1));
        prop_assert_eq!(index, 0);
    }

    #[test]
    fn shared_edge_goes_to_earlier_widget(count in 2usize..6, pick in 1usize..6) {
        // " i " buttons sit back to back, so button k starts on the last
        // column of button k - 1's edge-inclusive box
        let k = pick.min(count - 1);
        let config = GuiConfig { group_margin: 0, ..GuiConfig::default() };
        let mut gui = Gui::with_config(40, 4, config);
        gui.set_pointer_event(1 + 3 * k as i32, 1);

        let mut fired = Vec::new();
        gui.frame(|g| {
            g.start_group();
            for i in 0..count {
                fired.push(g.button(&i.to_string()));
            }
            g.end_group();
        });
        let expected: Vec<bool> = (0..count).map(|i| i == k - 1).collect();
        prop_assert_eq!(fired, expected);
    }
}
