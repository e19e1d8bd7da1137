use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use sha2::Digest as _;

use rsvp_card::card::layout::CARD_TEXT_STYLES;
use rsvp_card::render::fonts::FaceKey;
use rsvp_card::{
    CardTheme, CpuBackend, DirSink, FontBook, InviteSession, JsonFileStore, LogNotifier,
    NoShareSheet, Osc52Clipboard, RenderSettings, RsvpForm, RsvpStore, ShareOutcome, Side,
};

#[derive(Parser, Debug)]
#[command(name = "rsvp-card", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate an RSVP and write its access card PNG.
    Card(CardArgs),
    /// Print the card's draw commands as JSON.
    Layout(LayoutArgs),
    /// List stored RSVPs, newest first.
    Admin(AdminArgs),
    /// Share the invite link, or copy it to the terminal clipboard.
    Share(ShareArgs),
    /// Print which font face each card text style resolves to.
    Fonts(FontArgs),
}

#[derive(Args, Debug)]
struct RsvpArgs {
    /// Guest name.
    #[arg(long, default_value = "")]
    name: String,

    /// Email or phone.
    #[arg(long, default_value = "")]
    contact: String,

    /// "bride" or "groom".
    #[arg(long)]
    side: Option<String>,

    /// Party size (clamped to 1..=5).
    #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
    guests: i64,

    /// Card theme JSON.
    #[arg(long)]
    theme: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct FontOpts {
    /// Extra directory of font files.
    #[arg(long)]
    font_dir: Option<PathBuf>,

    /// Skip fonts installed on the host.
    #[arg(long, default_value_t = false)]
    no_system_fonts: bool,
}

#[derive(Parser, Debug)]
struct CardArgs {
    #[command(flatten)]
    rsvp: RsvpArgs,

    /// Directory receiving `RSVP_Card_<name>.png`.
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    #[command(flatten)]
    fonts: FontOpts,
}

#[derive(Parser, Debug)]
struct LayoutArgs {
    #[command(flatten)]
    rsvp: RsvpArgs,
}

#[derive(Parser, Debug)]
struct AdminArgs {
    /// JSON array of stored RSVP rows.
    #[arg(long)]
    store: PathBuf,
}

#[derive(Parser, Debug)]
struct ShareArgs {
    /// Invite page URL.
    #[arg(long)]
    url: String,

    /// Copy without trying a share sheet.
    #[arg(long, default_value_t = false)]
    copy_only: bool,
}

#[derive(Parser, Debug)]
struct FontArgs {
    #[command(flatten)]
    fonts: FontOpts,
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Card(args) => cmd_card(args),
        Command::Layout(args) => cmd_layout(args),
        Command::Admin(args) => cmd_admin(args),
        Command::Share(args) => cmd_share(args),
        Command::Fonts(args) => cmd_fonts(args),
    }
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_theme(path: Option<&Path>) -> anyhow::Result<CardTheme> {
    match path {
        Some(p) => CardTheme::from_path(p).with_context(|| format!("load theme '{}'", p.display())),
        None => Ok(CardTheme::default()),
    }
}

fn parse_side(side: Option<&str>) -> anyhow::Result<Option<Side>> {
    side.map(|s| s.parse::<Side>())
        .transpose()
        .context("parse --side")
}

fn fill_form(form: &mut RsvpForm, args: &RsvpArgs) -> anyhow::Result<()> {
    form.set_name(args.name.clone());
    form.set_contact(args.contact.clone());
    form.set_side(parse_side(args.side.as_deref())?);
    form.set_guests(args.guests);
    Ok(())
}

fn render_settings(opts: &FontOpts) -> RenderSettings {
    let mut settings = RenderSettings::from_env();
    settings.system_fonts = !opts.no_system_fonts;
    if let Some(dir) = &opts.font_dir {
        settings = settings.with_font_dir(dir);
    }
    settings
}

fn cmd_card(args: CardArgs) -> anyhow::Result<()> {
    let theme = load_theme(args.rsvp.theme.as_deref())?;
    let backend = CpuBackend::new(&render_settings(&args.fonts));
    let mut session = InviteSession::new(theme, backend, LogNotifier);

    fill_form(session.form_mut(), &args.rsvp)?;
    session.submit().context("rsvp rejected")?;

    let mut sink = DirSink::new(&args.out_dir);
    let Some(saved) = session.download_card(&mut sink) else {
        anyhow::bail!("card export failed (see log output)");
    };

    let path = saved.path.unwrap_or_else(|| args.out_dir.join(&saved.filename));
    eprintln!("wrote {}", path.display());
    Ok(())
}

fn cmd_layout(args: LayoutArgs) -> anyhow::Result<()> {
    let theme = load_theme(args.rsvp.theme.as_deref())?;
    let mut form = RsvpForm::new();
    fill_form(&mut form, &args.rsvp)?;
    let record = form.submit().context("rsvp rejected")?;

    let layout = rsvp_card::build_card(&record, &theme);
    let json = serde_json::to_string_pretty(&layout).context("serialize layout")?;
    println!("{json}");
    Ok(())
}

fn cmd_admin(args: AdminArgs) -> anyhow::Result<()> {
    let rows = JsonFileStore::new(&args.store)
        .list_recent()
        .with_context(|| format!("list rsvps from '{}'", args.store.display()))?;
    print!("{}", rsvp_card::render_admin_table(&rows));
    Ok(())
}

fn cmd_share(args: ShareArgs) -> anyhow::Result<()> {
    let mut clipboard = Osc52Clipboard::stdout();
    let mut notifier = LogNotifier;
    let outcome = if args.copy_only {
        if rsvp_card::copy_link(&args.url, &mut clipboard, &mut notifier) {
            ShareOutcome::Copied
        } else {
            ShareOutcome::Failed
        }
    } else {
        rsvp_card::share_invite(&args.url, &mut NoShareSheet, &mut clipboard, &mut notifier)
    };

    if outcome == ShareOutcome::Failed {
        anyhow::bail!("couldn't copy the link; please copy it manually: {}", args.url);
    }
    eprintln!("{outcome:?}: {}", args.url);
    Ok(())
}

fn cmd_fonts(args: FontArgs) -> anyhow::Result<()> {
    let mut book = FontBook::new(&render_settings(&args.fonts));
    eprintln!("font faces loaded: {}", book.face_count());
    for style in &CARD_TEXT_STYLES {
        let key = FaceKey::from(style);
        let font = book
            .resolve(key)
            .with_context(|| format!("resolve font for {key:?}"))?;
        eprintln!("  {:?} {:?} italic={}:", key.family, key.weight, key.italic);
        eprintln!("    family:  {}", font.family);
        eprintln!("    weight:  {}", font.weight);
        eprintln!("    sha256:  {}", sha256_hex(&font.bytes));
    }
    Ok(())
}

fn sha256_hex(bytes: &[u8]) -> String {
    let digest = sha2::Sha256::digest(bytes);
    let mut out = String::with_capacity(digest.len() * 2);
    for b in digest {
        out.push_str(&format!("{b:02x}"));
    }
    out
}
