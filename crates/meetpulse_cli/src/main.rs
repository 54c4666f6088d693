//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `meetpulse_core` wiring.
//! - Keep output deterministic for quick local sanity checks.

use meetpulse_core::{
    AuthService, FixedClock, MemorySlotRepository, NoteDraft, NoteService, Patch, SequentialIds,
};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    println!("meetpulse_core ping={}", meetpulse_core::ping());
    println!("meetpulse_core version={}", meetpulse_core::core_version());

    let log_dir = std::env::temp_dir().join("meetpulse-cli-logs");
    if let Some(dir) = log_dir.to_str() {
        if let Err(err) = meetpulse_core::init_logging(meetpulse_core::default_log_level(), dir) {
            eprintln!("logging disabled: {err}");
        }
    }

    // Deterministic in-memory run: fixed clock, sequential ids.
    let mut repo = MemorySlotRepository::new();
    let clock = FixedClock::new(1_700_000_000_000);
    let ids = SequentialIds::new();

    let owner = {
        let mut auth = AuthService::with_ids(&mut repo, &ids);
        let session = auth.register("Smoke User", "smoke@meetpulse.dev", "secret")?;
        println!(
            "session email={} token={}",
            session.user.email, session.token
        );
        session.user.id
    };

    let mut notes = NoteService::with_caps(&mut repo, &clock, &ids);
    let mut draft = NoteDraft::create(owner);
    draft.title = Patch::Set("Smoke check".to_string());
    draft.tags = Patch::Set(vec!["smoke".to_string()]);
    let saved = notes.save(draft)?;
    println!("saved id={} title={}", saved.id, saved.title);

    for note in notes.list_by_owner(owner)? {
        println!("list title={} updated_at={}", note.title, note.updated_at);
    }

    Ok(())
}
