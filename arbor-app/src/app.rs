//! Terminal event loop.

use arbor_dom::{Event, Terminal};

use crate::error::AppError;
use crate::page::{self, MainView, Outcome};

/// Run the page until the user quits.
pub fn run(mut view: MainView) -> Result<(), AppError> {
    let mut terminal = Terminal::new()?;
    let stylesheet = page::stylesheet();

    let mut root = view.render();
    terminal.render(&root, &stylesheet)?;
    log::info!("event loop started");

    loop {
        for raw in terminal.poll(None)? {
            // Targets resolve against the frame the user is looking at.
            let Some(event) = Event::from_crossterm(raw, &root, terminal.layout()) else {
                continue;
            };
            log::trace!("event {event:?}");

            match view.handle(&event) {
                Outcome::Quit => {
                    log::info!("quit requested");
                    return Ok(());
                }
                Outcome::Handled => {
                    root = view.render();
                    terminal.render(&root, &stylesheet)?;
                }
                Outcome::Ignored => {}
            }
        }
    }
}
