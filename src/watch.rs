use std::path::PathBuf;
use std::sync::mpsc::{Receiver, RecvTimeoutError, channel};
use std::time::Duration;

const DEBOUNCE: Duration = Duration::from_millis(250);

/// Watches `paths` on a background thread; each change sends a unit message.
pub fn spawn_watcher(paths: Vec<PathBuf>) -> Receiver<()> {
    let (tx, rx) = channel::<()>();
    std::thread::spawn(move || {
        use notify::{EventKind, RecursiveMode, Watcher};
        let watcher = notify::recommended_watcher(move |res: Result<notify::Event, notify::Error>| {
            if let Ok(event) = res {
                match event.kind {
                    EventKind::Modify(_)
                    | EventKind::Create(_)
                    | EventKind::Remove(_)
                    | EventKind::Any => {
                        let _ = tx.send(());
                    }
                    _ => {}
                }
            }
        });
        let mut watcher = match watcher {
            Ok(w) => w,
            Err(e) => {
                log::warn!("file watcher unavailable: {}", e);
                return;
            }
        };
        for p in &paths {
            let mode = if p.is_dir() {
                RecursiveMode::Recursive
            } else {
                RecursiveMode::NonRecursive
            };
            if let Err(e) = watcher.watch(p, mode) {
                log::warn!("cannot watch {:?}: {}", p, e);
            }
        }
        loop {
            std::thread::sleep(Duration::from_secs(3600));
        }
    });
    rx
}

/// Blocks until a change arrives, then swallows the burst that follows it.
/// Returns `false` once the watcher is gone.
pub fn wait_for_change(rx: &Receiver<()>) -> bool {
    if rx.recv().is_err() {
        return false;
    }
    loop {
        match rx.recv_timeout(DEBOUNCE) {
            Ok(()) => continue,
            Err(RecvTimeoutError::Timeout) => return true,
            Err(RecvTimeoutError::Disconnected) => return false,
        }
    }
}
