// Example: a host that renders a recycling window into plain text.
use recycler::{Measurement, SlotHost, SlotId, WindowManager, WindowOptions};

struct TextHost {
    labels: Vec<String>,
}

impl SlotHost<String> for TextHost {
    type Error = core::convert::Infallible;

    fn create(&mut self, _slot: SlotId) -> Result<(), Self::Error> {
        self.labels.push(String::new());
        Ok(())
    }

    fn bind(&mut self, slot: SlotId, _index: usize, item: &String) -> Result<(), Self::Error> {
        self.labels[slot.0].clone_from(item);
        Ok(())
    }

    fn measure(&mut self, slot: SlotId, width: f64) -> Result<Measurement, Self::Error> {
        // One 20-unit line per `width` worth of characters (8 units each).
        let chars_per_line = (width / 8.0).max(1.0) as usize;
        let lines = self.labels[slot.0].len().div_ceil(chars_per_line).max(1);
        Ok(Measurement::new(lines as f64 * 20.0, 4.0))
    }
}

fn main() {
    let items = (0..10_000).map(|i| {
        if i % 7 == 0 {
            format!("item {i}: a longer row that wraps onto a second line")
        } else {
            format!("item {i}")
        }
    });

    let mut w = WindowManager::with_items(
        WindowOptions::translate().with_overscan(1),
        TextHost { labels: Vec::new() },
        items,
    );
    let Ok(()) = w.set_viewport(240.0, 200.0);
    println!("pool_size={} range={:?}", w.pool_size(), w.window_range());

    // Simulate a drag: 40 frames moving content up by 12 units each.
    for frame in 0..40 {
        let Ok(recycled) = w.apply_scroll(-12.0);
        if recycled > 0 && frame % 5 == 0 {
            println!("frame={frame} first={} recycled={recycled}", w.first_visible_index());
        }
    }

    w.for_each_slot(|s| {
        println!(
            "#{:<4} y={:>7.1} h={:>5.1} {}",
            s.index,
            s.offset,
            s.extent,
            w.host().labels[s.slot.0]
        );
    });
}
