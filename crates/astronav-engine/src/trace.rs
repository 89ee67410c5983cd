use astronav_core::{Scalar, Vec2};

/* ---------------------- Debug settings ---------------------- */
#[derive(Copy, Clone, Debug)]
pub struct DebugSettings {
    /// Print a playback summary every N frames (0 = disabled)
    pub print_every: u32,
    pub show_ship: bool,
    pub show_bodies: bool,
    pub max_lines: usize, // clamp output lines
}

impl Default for DebugSettings {
    fn default() -> Self {
        Self {
            print_every: 0,
            show_ship: false,
            show_bodies: false,
            max_lines: 200,
        }
    }
}

/* ---------------------- Telemetry events ---------------------- */
#[derive(Clone, Debug)]
pub enum TraceEvent {
    // One playback frame dispensed
    Frame { tick: u64, t_u: Scalar, x: Vec2, v: Vec2, fuel: Scalar, collected: u32 },

    // Artifact newly picked up at this frame
    Capture { id: u32, t_u: Scalar },

    // Playback drained
    Done { frames: u64, total_cost: Scalar },
}

impl TraceEvent {
    pub fn to_json(&self) -> String {
        match *self {
            TraceEvent::Frame { tick, t_u, x, v, fuel, collected } => format!(
                r#"{{"t":"F","tick":{},"tu":{:.6},"x":{:.6},"y":{:.6},"vx":{:.6},"vy":{:.6},"fuel":{:.6},"got":{}}}"#,
                tick, t_u, x.x, x.y, v.x, v.y, fuel, collected
            ),
            TraceEvent::Capture { id, t_u } => {
                format!(r#"{{"t":"A","id":{},"tu":{:.6}}}"#, id, t_u)
            }
            TraceEvent::Done { frames, total_cost } => {
                format!(r#"{{"t":"D","frames":{},"cost":{:.6}}}"#, frames, total_cost)
            }
        }
    }
}

/* ---------------------- Ledger buffer ---------------------- */
pub struct Ledger {
    events: Vec<TraceEvent>,
    cap: usize,
}

impl Ledger {
    /// Create a ledger holding at most `cap` events.
    pub fn new(cap: usize) -> Self {
        Self { events: Vec::with_capacity(cap), cap }
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Append one event (drops if over cap).
    pub fn push(&mut self, e: TraceEvent) {
        if self.events.len() < self.cap {
            self.events.push(e);
        }
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TraceEvent> {
        self.events.iter()
    }

    /// Write events as JSONL to `dir/playback_######.jsonl` (deterministic order).
    pub fn write_jsonl(&self, dir: &str, tick: u64) -> std::io::Result<()> {
        use std::fs::{create_dir_all, OpenOptions};
        use std::io::Write;

        create_dir_all(dir)?;
        let path = format!("{}/playback_{:06}.jsonl", dir, tick);
        let mut f = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path)?;
        for e in self.events.iter() {
            f.write_all(e.to_json().as_bytes())?;
            f.write_all(b"\n")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use astronav_core::vec2;

    #[test]
    fn ledger_caps_event_count() {
        let mut l = Ledger::new(2);
        for i in 0..5 {
            l.push(TraceEvent::Capture { id: i, t_u: 0.0 });
        }
        assert_eq!(l.len(), 2);
    }

    #[test]
    fn events_render_as_json_lines() {
        let e = TraceEvent::Frame {
            tick: 3,
            t_u: 1.5,
            x: vec2(1.0, 2.0),
            v: vec2(0.0, 0.0),
            fuel: 4.0,
            collected: 1,
        };
        let line = e.to_json();
        assert!(line.starts_with('{') && line.ends_with('}'));
        assert!(line.contains(r#""t":"F""#));
        assert!(line.contains(r#""tick":3"#));
    }
}
