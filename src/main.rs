//! Echo of Silence entry point
//!
//! Web: builds the DOM front end and routes pointer clicks into the session.
//! Native: a line-oriented terminal driver for hot-seat play and smoke tests.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, HtmlButtonElement, HtmlElement, HtmlInputElement, MouseEvent};

    use echo_of_silence::audio::AudioManager;
    use echo_of_silence::feedback::{
        EchoTrail, VisibleEcho, avatar_initial, outcome_message, player_color, sounds_for,
    };
    use echo_of_silence::platform::SurfaceRect;
    use echo_of_silence::{GamePhase, PlayerSlot, Session, SessionSnapshot, Settings};

    const RULES: &str = "<h2>Echo of Silence - Game Rules</h2>\
        <ol>\
        <li>Players take turns clicking anywhere on the screen to send out an echo.</li>\
        <li>The echo reveals hidden objects within its range.</li>\
        <li>A revealed object is claimed by the current player for one point.</li>\
        <li>The game ends when all hidden objects are found.</li>\
        <li>The player with the most points wins!</li>\
        </ol>\
        <p>Listen for the tones: a low ping for every echo, a higher one for each discovery.</p>";

    /// Game instance holding all state
    struct Game {
        session: Session,
        trail: EchoTrail,
        audio: AudioManager,
        settings: Settings,
        /// Round whose markers are currently in the DOM
        rendered_round: u32,
        /// Click point the current ring is drawn at
        ring_shown: Option<Vec2>,
        ring_id: u64,
    }

    impl Game {
        fn new(settings: Settings, seed: u64) -> Self {
            let mut audio = AudioManager::new();
            audio.set_master_volume(settings.master_volume);
            audio.set_muted(settings.muted);
            Self {
                session: Session::new(seed),
                trail: EchoTrail::new(settings.echo_fade_ms),
                audio,
                settings,
                rendered_round: 0,
                ring_shown: None,
                ring_id: 0,
            }
        }
    }

    fn document() -> Option<Document> {
        web_sys::window()?.document()
    }

    fn by_id(id: &str) -> Option<Element> {
        document()?.get_element_by_id(id)
    }

    fn set_hidden(id: &str, hidden: bool) {
        if let Some(el) = by_id(id) {
            let _ = el.class_list().toggle_with_force("hidden", hidden);
        }
    }

    fn now_ms() -> f64 {
        js_sys::Date::now()
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Echo of Silence starting...");

        let settings = Settings::load();
        let seed = settings.seed.unwrap_or_else(|| js_sys::Date::now() as u64);
        let game = Rc::new(RefCell::new(Game::new(settings, seed)));
        log::info!("Session created with seed: {}", seed);

        let Some(app) = by_id("app") else {
            log::error!("Missing #app container");
            return;
        };
        build_dom(&app);

        setup_name_inputs(game.clone());
        setup_start_button(game.clone());
        setup_board(game.clone());
        setup_restart_button(game.clone());

        render(&mut game.borrow_mut());
        log::info!("Echo of Silence running!");
    }

    fn build_dom(app: &Element) {
        app.set_inner_html(&format!(
            "<div id=\"setup\" class=\"screen\">\
               <h1>Echo of Silence</h1>\
               <label for=\"player1\">Player 1 Name:</label><input id=\"player1\" type=\"text\">\
               <label for=\"player2\">Player 2 Name:</label><input id=\"player2\" type=\"text\">\
               <button id=\"start-btn\" disabled>Start Game</button>\
               <details id=\"rules\"><summary>How to play</summary>{RULES}</details>\
             </div>\
             <div id=\"board\" class=\"hidden\">\
               <div id=\"echoes\"></div><div id=\"markers\"></div>\
               <div id=\"hud\"></div>\
               <div id=\"hint\">Click to send out an echo and reveal hidden objects!</div>\
             </div>\
             <div id=\"game-over\" class=\"hidden\">\
               <h2>Game Over!</h2><p id=\"winner-text\"></p>\
               <button id=\"restart-btn\">Play Again</button>\
             </div>"
        ));
    }

    fn setup_name_inputs(game: Rc<RefCell<Game>>) {
        for slot in PlayerSlot::ALL {
            let id = format!("player{}", slot.number());
            let Some(input) = by_id(&id).and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
            else {
                log::warn!("Missing name input #{}", id);
                continue;
            };
            let game = game.clone();
            let input_clone = input.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let mut g = game.borrow_mut();
                g.session.set_player_name(slot, input_clone.value());
                update_start_button(&g);
            });
            let _ = input.add_event_listener_with_callback("input", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn update_start_button(game: &Game) {
        if let Some(btn) = by_id("start-btn").and_then(|el| el.dyn_into::<HtmlButtonElement>().ok())
        {
            btn.set_disabled(!game.session.can_start());
        }
    }

    fn setup_start_button(game: Rc<RefCell<Game>>) {
        let Some(btn) = by_id("start-btn") else { return };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
            let mut g = game.borrow_mut();
            if g.session.start_game() {
                g.audio.resume();
                render(&mut g);
            }
        });
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_board(game: Rc<RefCell<Game>>) {
        let Some(board) = by_id("board") else { return };
        let board_clone = board.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
            let r = board_clone.get_bounding_client_rect();
            let rect = SurfaceRect::new(
                r.left() as f32,
                r.top() as f32,
                r.width() as f32,
                r.height() as f32,
            );
            let Some(pos) = rect.to_percent(event.client_x() as f32, event.client_y() as f32)
            else {
                return;
            };

            let mut g = game.borrow_mut();
            let events = g.session.handle_click(pos.x, pos.y);
            if events.is_empty() {
                return;
            }

            for sound in sounds_for(&events) {
                g.audio.play(sound);
            }
            let fade_ms = g.trail.fade_ms();
            for echo in g.trail.observe(&events, now_ms()) {
                spawn_echo(&echo, fade_ms);
            }
            schedule_expiry(game.clone(), fade_ms);
            // Redraw the ring even for a repeat click on the same spot
            g.ring_shown = None;
            render(&mut g);
        });
        let _ = board.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_restart_button(game: Rc<RefCell<Game>>) {
        let Some(btn) = by_id("restart-btn") else { return };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
            let mut g = game.borrow_mut();
            if g.session.restart() {
                for echo in g.trail.visible() {
                    if let Some(el) = by_id(&format!("echo-{}", echo.id)) {
                        el.remove();
                    }
                }
                g.trail.clear();
                render(&mut g);
            }
        });
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn spawn_echo(echo: &VisibleEcho, fade_ms: u32) {
        let (Some(document), Some(layer)) = (document(), by_id("echoes")) else {
            return;
        };
        let Ok(el) = document.create_element("div") else { return };
        el.set_id(&format!("echo-{}", echo.id));
        let _ = el.set_attribute("class", "echo");
        let _ = el.set_attribute(
            "style",
            &format!(
                "left:{}%;top:{}%;animation-duration:{}ms",
                echo.pos.x, echo.pos.y, fade_ms
            ),
        );
        let _ = layer.append_child(&el);
    }

    fn spawn_ring(id: u64, pos: Vec2, fade_ms: u32) {
        let (Some(document), Some(layer)) = (document(), by_id("echoes")) else {
            return;
        };
        let Ok(el) = document.create_element("div") else { return };
        el.set_id(&format!("click-ring-{}", id));
        let _ = el.set_attribute("class", "ring");
        let _ = el.set_attribute(
            "style",
            &format!(
                "left:{}%;top:{}%;animation-duration:{}ms",
                pos.x, pos.y, fade_ms
            ),
        );
        let _ = layer.append_child(&el);

        let Some(window) = web_sys::window() else { return };
        let closure = Closure::once(move || {
            if let Some(el) = by_id(&format!("click-ring-{}", id)) {
                el.remove();
            }
        });
        let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            fade_ms as i32,
        );
        closure.forget();
    }

    /// Remove faded echoes once their lifetime has passed
    fn schedule_expiry(game: Rc<RefCell<Game>>, fade_ms: u32) {
        let Some(window) = web_sys::window() else { return };
        let closure = Closure::once(move || {
            let expired = game.borrow_mut().trail.expire(now_ms());
            for id in expired {
                if let Some(el) = by_id(&format!("echo-{}", id)) {
                    el.remove();
                }
            }
        });
        let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            // One frame of slack so the timer never fires before the echo is due
            fade_ms as i32 + 16,
        );
        closure.forget();
    }

    /// Sync the DOM with the session snapshot
    fn render(game: &mut Game) {
        let snap = SessionSnapshot::capture(&game.session);

        set_hidden("setup", snap.phase != GamePhase::Setup);
        set_hidden("board", snap.phase == GamePhase::Setup);
        set_hidden("game-over", snap.phase != GamePhase::Over);

        if let Some(hud) = by_id("hud") {
            let rows: String = PlayerSlot::ALL
                .iter()
                .map(|&slot| {
                    let player = snap.player(slot);
                    let active = if slot == snap.turn { "active" } else { "idle" };
                    format!(
                        "<div class=\"player {active}\">\
                           <span class=\"avatar\" style=\"background:{}\">{}</span>\
                           <span>{}: {}</span></div>",
                        player_color(slot),
                        escape(&avatar_initial(player)),
                        escape(&player.name),
                        player.score
                    )
                })
                .collect();
            hud.set_inner_html(&rows);
        }

        if game.rendered_round != snap.round {
            if let Some(markers) = by_id("markers") {
                markers.set_inner_html("");
            }
            game.rendered_round = snap.round;
        }
        if snap.last_echo != game.ring_shown {
            if let Some(el) = by_id(&format!("click-ring-{}", game.ring_id)) {
                el.remove();
            }
            if let Some(pos) = snap.last_echo {
                game.ring_id += 1;
                spawn_ring(game.ring_id, pos, game.trail.fade_ms());
            }
            game.ring_shown = snap.last_echo;
        }

        let pulse = if game.settings.reduced_motion { "" } else { " pulse" };
        if let (Some(document), Some(layer)) = (document(), by_id("markers")) {
            for object in snap.revealed() {
                let id = format!("marker-{}", object.id);
                if document.get_element_by_id(&id).is_some() {
                    continue;
                }
                let Some(by) = object.revealed_by else { continue };
                let Ok(el) = document.create_element("div") else { continue };
                el.set_id(&id);
                let _ = el.set_attribute("class", &format!("marker{pulse}"));
                let _ = el.set_attribute(
                    "style",
                    &format!(
                        "left:{}%;top:{}%;background:{}",
                        object.pos.x,
                        object.pos.y,
                        player_color(by)
                    ),
                );
                let _ = layer.append_child(&el);
            }
        }

        if let (Some(outcome), Some(text)) = (snap.outcome, by_id("winner-text")) {
            text.set_text_content(Some(&outcome_message(outcome, &snap.players)));
        }

        if let Some(hint) = by_id("hint").and_then(|el| el.dyn_into::<HtmlElement>().ok()) {
            hint.set_hidden(snap.phase != GamePhase::Playing);
        }
    }

    /// Player names go into innerHTML
    fn escape(s: &str) -> String {
        s.replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
            .replace('"', "&quot;")
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod native_game {
    use std::io::{self, BufRead, Write};
    use std::time::{SystemTime, UNIX_EPOCH};

    use echo_of_silence::feedback::{outcome_message, sounds_for};
    use echo_of_silence::{GameEvent, GamePhase, PlayerSlot, Session, SessionSnapshot, Settings};

    fn clock_seed() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }

    fn prompt(out: &mut impl Write, text: &str) {
        let _ = write!(out, "{text}");
        let _ = out.flush();
    }

    fn print_hud(session: &Session, json: bool) {
        let snap = SessionSnapshot::capture(session);
        let line: Vec<String> = PlayerSlot::ALL
            .iter()
            .map(|&slot| {
                let player = snap.player(slot);
                let marker = if slot == snap.turn { ">" } else { " " };
                format!("{marker} {}: {}", player.name, player.score)
            })
            .collect();
        println!("{}   [{} hidden]", line.join("   "), snap.remaining);
        if json {
            println!("{}", snap.to_json());
        }
    }

    fn print_events(session: &Session, events: &[GameEvent]) {
        for sound in sounds_for(events) {
            let tone = sound.tone();
            println!("  ({:?} {} Hz)", sound, tone.frequency);
        }
        for event in events {
            match *event {
                GameEvent::EchoEmitted { x, y } => println!("~ echo at ({x:.1}, {y:.1})"),
                GameEvent::ObjectRevealed { object_id, by, x, y } => println!(
                    "* {} found object {} at ({:.1}, {:.1})",
                    session.player(by).name,
                    object_id,
                    x,
                    y
                ),
                GameEvent::GameOver { outcome } => {
                    println!("Game Over! {}", outcome_message(outcome, session.players()));
                    println!("Type 'restart' to play again or 'quit' to exit.");
                }
            }
        }
    }

    pub fn run() {
        let settings = Settings::load();
        let seed = settings.seed.unwrap_or_else(clock_seed);
        let mut session = Session::new(seed);
        log::info!("Session created with seed: {}", seed);

        let stdin = io::stdin();
        let mut lines = stdin.lock().lines();
        let mut out = io::stdout();

        println!("Echo of Silence (seed {seed})");
        while session.phase() == GamePhase::Setup {
            for slot in PlayerSlot::ALL {
                prompt(&mut out, &format!("Player {} name: ", slot.number()));
                let Some(Ok(name)) = lines.next() else { return };
                session.set_player_name(slot, name.trim());
            }
            if !session.start_game() {
                println!("Both players need a name.");
            }
        }

        println!("Enter clicks as `x y` in [0, 100]. Commands: restart, quit");
        print_hud(&session, settings.json);
        loop {
            prompt(&mut out, "> ");
            let Some(Ok(line)) = lines.next() else { break };
            let line = line.trim();
            match line {
                "" => continue,
                "q" | "quit" | "exit" => break,
                "restart" => {
                    if session.restart() {
                        println!("New round - objects rehidden.");
                    }
                }
                _ => {
                    let coords: Vec<f32> = line
                        .split([' ', ',', '\t'])
                        .filter(|s| !s.is_empty())
                        .filter_map(|s| s.parse().ok())
                        .collect();
                    let [x, y] = coords[..] else {
                        println!("Expected two numbers, e.g. `42 17.5`");
                        continue;
                    };
                    let events = session.handle_click(x, y);
                    if events.is_empty() {
                        println!("The round is over. Type 'restart' or 'quit'.");
                        continue;
                    }
                    print_events(&session, &events);
                }
            }
            print_hud(&session, settings.json);
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Echo of Silence (native) starting...");
    native_game::run();
}
