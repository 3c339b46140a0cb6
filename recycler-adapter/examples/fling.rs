use recycler::{Measurement, SlotHost, SlotId, WindowOptions};
use recycler_adapter::{FlingController, FlingOptions, GestureEvent};

/// Fixed-height rows; the host only remembers which index each slot shows.
struct Rows;

impl SlotHost<u32> for Rows {
    type Error = core::convert::Infallible;

    fn bind(&mut self, _slot: SlotId, _index: usize, _item: &u32) -> Result<(), Self::Error> {
        Ok(())
    }

    fn measure(&mut self, _slot: SlotId, _width: f64) -> Result<Measurement, Self::Error> {
        Ok(Measurement::new(48.0, 0.0))
    }
}

fn main() {
    // Example: a framework-neutral drag + fling loop.
    //
    // An adapter would:
    // - forward pan recognizer samples to handle()
    // - call tick(now_ms) from its frame callback while is_flinging()
    // - position slots from the window's for_each_slot()
    let mut c = FlingController::new(WindowOptions::translate(), Rows)
        .with_fling_options(FlingOptions::default().with_duration_ms(600));
    let Ok(()) = c.set_items(0..1_000u32);
    let Ok(()) = c.on_viewport(360.0, 640.0);

    let Ok(_) = c.handle(GestureEvent::Started { now_ms: 0 });
    for step in 1..=8u64 {
        let Ok(_) = c.handle(GestureEvent::Moved {
            total_offset: -30.0 * step as f64,
            now_ms: step * 16,
        });
    }
    let Ok(state) = c.handle(GestureEvent::Ended { now_ms: 128 });
    println!(
        "released: state={state:?} velocity={:.3} first={}",
        c.release_velocity(),
        c.window().first_visible_index()
    );

    let mut now_ms = 128u64;
    loop {
        now_ms += 16;
        let Ok(Some(offset)) = c.tick(now_ms) else {
            break;
        };
        if now_ms.is_multiple_of(96) {
            println!(
                "t={now_ms} offset={offset:.1} range={:?}",
                c.window().window_range()
            );
        }
    }

    println!(
        "done: state={:?} offset={:.1} first={}",
        c.state(),
        c.window().scroll_offset(),
        c.window().first_visible_index()
    );
}
