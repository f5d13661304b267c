//! Rhai API function registration
//!
//! All functions accessible from scripts are registered here. They read the
//! frame snapshot and queue requests through the shared ScriptCallContext.

use crate::context::{Completion, RunRequest, ScriptCallContext, ScriptCommand};
use crate::loader;
use glint_runtime::RunConfig;
use rhai::{Dynamic, Engine, EvalAltResult, FnPtr, Map, FLOAT, INT};
use std::sync::{Arc, Mutex};

type ApiResult<T> = Result<T, Box<EvalAltResult>>;

/// Register all API functions on the Rhai engine
pub fn register_all(engine: &mut Engine, ctx: Arc<Mutex<ScriptCallContext>>) {
    register_app_api(engine, ctx.clone());
    register_time_api(engine, ctx.clone());
    register_input_api(engine, ctx.clone());
    register_graphics_api(engine, ctx.clone());
    register_load_api(engine, ctx);
    register_console_api(engine);
}

// ─── App API ─────────────────────────────────────────────

fn register_app_api(engine: &mut Engine, ctx: Arc<Mutex<ScriptCallContext>>) {
    // run(config: Map)
    {
        let ctx = ctx.clone();
        engine.register_fn("run", move |config: Map| -> ApiResult<()> {
            let mut c = ctx.lock().unwrap();
            if c.run_request.is_some() {
                return Err("run: app is already running".into());
            }
            let request = parse_run_config(&config, &c)?;
            log::debug!(
                "run requested: '{}' {}x{}",
                request.config.title,
                request.config.width,
                request.config.height
            );
            c.run_request = Some(request);
            Ok(())
        });
    }

    // quit()
    {
        let ctx = ctx.clone();
        engine.register_fn("quit", move || {
            let mut c = ctx.lock().unwrap();
            c.commands.push(ScriptCommand::Quit);
        });
    }

    // width() -> INT
    {
        let ctx = ctx.clone();
        engine.register_fn("width", move || -> INT {
            let c = ctx.lock().unwrap();
            c.app.width() as INT
        });
    }

    // height() -> INT
    {
        let ctx = ctx.clone();
        engine.register_fn("height", move || -> INT {
            let c = ctx.lock().unwrap();
            c.app.height() as INT
        });
    }
}

fn parse_run_config(config: &Map, c: &ScriptCallContext) -> ApiResult<RunRequest> {
    let defaults = &c.window_defaults;

    let title = match config.get("title") {
        Some(v) if !v.is_unit() => v
            .clone()
            .into_string()
            .map_err(|t| format!("run: 'title' must be a string, got {}", t))?,
        _ => defaults.title.clone(),
    };
    let width = size_field(config, "width", defaults.width)?;
    let height = size_field(config, "height", defaults.height)?;

    let init = callback_field(config, "init")?;
    let frame = callback_field(config, "frame")?
        .ok_or_else(|| Box::<EvalAltResult>::from("run: 'frame' callback is required"))?;

    Ok(RunRequest {
        config: RunConfig {
            title,
            width,
            height,
        },
        init,
        frame,
    })
}

fn size_field(config: &Map, field: &str, default: u32) -> ApiResult<u32> {
    let Some(value) = config.get(field).filter(|v| !v.is_unit()) else {
        return Ok(default);
    };
    let n = value
        .as_int()
        .map_err(|t| format!("run: '{}' must be an integer, got {}", field, t))?;
    u32::try_from(n)
        .ok()
        .filter(|n| *n > 0)
        .ok_or_else(|| format!("run: '{}' must be positive, got {}", field, n).into())
}

/// Accepts a function pointer (`Fn("name")` or a closure) or a function name
fn callback_field(config: &Map, field: &str) -> ApiResult<Option<FnPtr>> {
    let Some(value) = config.get(field).filter(|v| !v.is_unit()) else {
        return Ok(None);
    };
    if value.is::<FnPtr>() {
        return Ok(Some(value.clone().cast::<FnPtr>()));
    }
    if value.is_string() {
        let name = value.clone().into_string().unwrap_or_default();
        return FnPtr::new(name).map(Some);
    }
    Err(format!("run: '{}' must be a function, got {}", field, value.type_name()).into())
}

// ─── Time API ────────────────────────────────────────────

fn register_time_api(engine: &mut Engine, ctx: Arc<Mutex<ScriptCallContext>>) {
    {
        let ctx = ctx.clone();
        engine.register_fn("time", move || -> FLOAT {
            let c = ctx.lock().unwrap();
            c.app.time()
        });
    }
    {
        let ctx = ctx.clone();
        engine.register_fn("dt", move || -> FLOAT {
            let c = ctx.lock().unwrap();
            c.app.dt()
        });
    }
}

// ─── Input API ───────────────────────────────────────────

fn register_input_api(engine: &mut Engine, ctx: Arc<Mutex<ScriptCallContext>>) {
    {
        let ctx = ctx.clone();
        engine.register_fn("keyPressed", move |name: &str| -> bool {
            let c = ctx.lock().unwrap();
            c.app.input.is_key_pressed(name)
        });
    }
    {
        let ctx = ctx.clone();
        engine.register_fn("keyPressedRep", move |name: &str| -> bool {
            let c = ctx.lock().unwrap();
            c.app.input.is_key_pressed_or_repeat(name)
        });
    }
    {
        let ctx = ctx.clone();
        engine.register_fn("keyDown", move |name: &str| -> bool {
            let c = ctx.lock().unwrap();
            c.app.input.is_key_down(name)
        });
    }
    {
        let ctx = ctx.clone();
        engine.register_fn("keyReleased", move |name: &str| -> bool {
            let c = ctx.lock().unwrap();
            c.app.input.is_key_released(name)
        });
    }
    {
        let ctx = ctx.clone();
        engine.register_fn("mousePressed", move || -> bool {
            let c = ctx.lock().unwrap();
            c.app.input.is_pointer_pressed()
        });
    }
    {
        let ctx = ctx.clone();
        engine.register_fn("mouseDown", move || -> bool {
            let c = ctx.lock().unwrap();
            c.app.input.is_pointer_down()
        });
    }
    {
        let ctx = ctx.clone();
        engine.register_fn("mouseReleased", move || -> bool {
            let c = ctx.lock().unwrap();
            c.app.input.is_pointer_released()
        });
    }
    {
        let ctx = ctx.clone();
        engine.register_fn("mouseX", move || -> FLOAT {
            let c = ctx.lock().unwrap();
            c.app.mouse_x()
        });
    }
    {
        let ctx = ctx.clone();
        engine.register_fn("mouseY", move || -> FLOAT {
            let c = ctx.lock().unwrap();
            c.app.mouse_y()
        });
    }
}

// ─── Graphics API ────────────────────────────────────────

fn register_graphics_api(engine: &mut Engine, ctx: Arc<Mutex<ScriptCallContext>>) {
    // clear(r, g, b, a)
    {
        let ctx = ctx.clone();
        engine.register_fn("clear", move |r: FLOAT, g: FLOAT, b: FLOAT, a: FLOAT| {
            let mut c = ctx.lock().unwrap();
            c.commands.push(ScriptCommand::Clear {
                color: [r as f32, g as f32, b as f32, a as f32],
            });
        });
    }

    // clear(r, g, b)
    {
        let ctx = ctx.clone();
        engine.register_fn("clear", move |r: FLOAT, g: FLOAT, b: FLOAT| {
            let mut c = ctx.lock().unwrap();
            c.commands.push(ScriptCommand::Clear {
                color: [r as f32, g as f32, b as f32, 1.0],
            });
        });
    }
}

// ─── Load API ────────────────────────────────────────────

fn register_load_api(engine: &mut Engine, ctx: Arc<Mutex<ScriptCallContext>>) {
    // read_text(path) -> String
    {
        let ctx = ctx.clone();
        engine.register_fn("read_text", move |path: &str| -> ApiResult<String> {
            let full = ctx.lock().unwrap().resolve(path);
            loader::read_text(&full).map_err(|e| format!("read_text('{}'): {}", path, e).into())
        });
    }

    // load_text(path, callback)
    {
        let ctx = ctx.clone();
        engine.register_fn("load_text", move |path: &str, callback: FnPtr| {
            let mut c = ctx.lock().unwrap();
            let value = match loader::read_text(&c.resolve(path)) {
                Ok(text) => Dynamic::from(text),
                Err(e) => {
                    log::error!(target: "script", "load_text('{}'): {}", path, e);
                    Dynamic::UNIT
                }
            };
            c.completions.push(Completion {
                callback,
                value,
                source: path.to_string(),
            });
        });
    }

    // load_image(path, callback) -> callback receives #{width, height, data}
    {
        let ctx = ctx.clone();
        engine.register_fn("load_image", move |path: &str, callback: FnPtr| {
            let mut c = ctx.lock().unwrap();
            let value = match loader::load_image(&c.resolve(path)) {
                Ok(img) => {
                    let mut map = Map::new();
                    map.insert("width".into(), Dynamic::from(img.width as INT));
                    map.insert("height".into(), Dynamic::from(img.height as INT));
                    map.insert("data".into(), Dynamic::from_blob(img.data));
                    Dynamic::from_map(map)
                }
                Err(e) => {
                    log::error!(target: "script", "load_image('{}'): {}", path, e);
                    Dynamic::UNIT
                }
            };
            c.completions.push(Completion {
                callback,
                value,
                source: path.to_string(),
            });
        });
    }
}

// ─── Console API ─────────────────────────────────────────

fn register_console_api(engine: &mut Engine) {
    engine.on_print(|msg| log::info!(target: "script", "{}", msg));
    engine.on_debug(|msg, source, pos| {
        log::debug!(target: "script", "{} @ {}: {}", source.unwrap_or("script"), pos, msg)
    });

    engine.register_fn("log", |msg: &str| {
        log::info!(target: "script", "{}", msg);
    });
    engine.register_fn("log_warn", |msg: &str| {
        log::warn!(target: "script", "{}", msg);
    });
    engine.register_fn("log_error", |msg: &str| {
        log::error!(target: "script", "{}", msg);
    });
}
