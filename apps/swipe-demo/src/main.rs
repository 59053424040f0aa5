mod inbox;
mod script;

use anyhow::{bail, Context, Result};
use inbox::{Inbox, InboxAdapter};
use script::Script;
use std::rc::Rc;
use std::time::Duration;
use swipedismiss_animation::{Animator, FrameAnimator, FrameClock, ImmediateAnimator};
use swipedismiss_foundation::{SwipeDismissConfig, SwipeDismissListener, SwipeMode};

const LIST_WIDTH: f32 = 360.0;
const FRAME: Duration = Duration::from_millis(16);

const MESSAGES: &[(&str, bool)] = &[
    ("Welcome aboard", true),
    ("Build failed on main", false),
    ("Lunch on Friday?", false),
    ("Your invoice is ready", false),
    ("Weekly digest", false),
    ("Password changed", false),
];

#[derive(Debug, PartialEq)]
struct Options {
    mode: SwipeMode,
    commit: bool,
    immediate: bool,
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Result<Options> {
    let mut options = Options {
        mode: SwipeMode::Both,
        commit: true,
        immediate: false,
    };
    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--mode" => {
                let value = args.next().context("--mode needs a value")?;
                options.mode = value
                    .parse()
                    .with_context(|| format!("invalid --mode {value:?}"))?;
            }
            "--no-commit" => options.commit = false,
            "--immediate" => options.immediate = true,
            other => bail!("unknown argument {other:?}"),
        }
    }
    Ok(options)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let options = parse_args(std::env::args().skip(1))?;

    println!("=== Swipe to dismiss ===");
    println!("Rows marked * are pinned and cannot be dismissed.");
    println!("Columns: offset | opacity | height");
    println!();

    let inbox = Inbox::new(LIST_WIDTH, MESSAGES);
    print!("{}", inbox.render());

    let clock = FrameClock::new();
    let animator: Rc<dyn Animator> = if options.immediate {
        Rc::new(ImmediateAnimator)
    } else {
        Rc::new(FrameAnimator::new(clock.clone()))
    };
    let config = SwipeDismissConfig::default()
        .with_swipe_mode(options.mode)
        .with_commit_dismiss(options.commit);
    let listener = SwipeDismissListener::new(
        inbox.clone(),
        Rc::new(InboxAdapter::new(inbox.clone())),
        animator,
    )
    .with_config(config)
    .context("demo configuration")?;
    log::debug!("{listener:?}");

    let mut script = Script::inbox_tour();
    let start = clock.uptime_millis();
    loop {
        let now = clock.uptime_millis() - start;
        script.run_due(now, &inbox, &listener);
        clock.drain_now();
        if script.is_finished() && !clock.has_pending_callbacks() {
            break;
        }
        std::thread::sleep(FRAME);
    }

    println!();
    println!("{} rows left, archived: {:?}", inbox.len(), inbox.archived());
    Ok(())
}
