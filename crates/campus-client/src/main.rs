//! `campus`: a line-oriented console over the view controller.

use anyhow::{bail, Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};

use campus_client_lib::assistant::target_languages;
use campus_client_lib::commands::{assistant, auth, channels, chats, notifications, settings};
use campus_client_lib::config::ClientConfig;
use campus_client_lib::push::UnsupportedRegistrar;
use campus_client_lib::view::{ChannelAccess, DashboardVariant, ShellScreen, View, ViewController};
use campus_shared::constants::APP_NAME;
use campus_shared::types::{ChannelId, ChatId, ContentKind, Language, Role, UserId};
use campus_store::{NewContent, ProfileSettings};

const HELP: &str = "\
commands:
  login <email> <student|professor>     register <email> <role> <name>
  demo <student|professor>              logout
  channels                              open <channel-id>
  subscribe <channel-id>                say <text>
  publish <pdf|image|video> <url>       chats
  chat <user-id>                        pm <chat-id> <text>
  ask <question>                        translate <ar|en|fr> <text>
  settings [dark|light] [ar|en|fr]      profile <name>
  notify                                assistant
  back                                  help | quit";

#[tokio::main]
async fn main() -> Result<()> {
    campus_client_lib::init_tracing();

    let config = ClientConfig::from_env();
    tracing::info!(?config, "Starting {APP_NAME}");

    let state = campus_client_lib::build_state(config);
    let mut vc = ViewController::new(state);

    vc.boot().await.context("boot failed")?;
    render(&vc)?;
    println!("{HELP}");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if matches!(line, "quit" | "exit") {
            break;
        }
        match dispatch(&mut vc, line).await {
            Ok(()) => render(&vc)?,
            Err(e) => {
                let language = settings::get_settings(vc.state())?.language;
                match e.downcast_ref::<campus_client_lib::error::CommandError>() {
                    Some(cmd) => eprintln!("! {}", cmd.user_message(language)),
                    None => eprintln!("! {e}"),
                }
            }
        }
    }
    Ok(())
}

fn split(rest: &str) -> (&str, &str) {
    let rest = rest.trim();
    rest.split_once(' ').map(|(a, b)| (a, b.trim())).unwrap_or((rest, ""))
}

fn role(s: &str) -> Result<Role> {
    Role::parse(s).with_context(|| format!("unknown role '{s}'"))
}

async fn dispatch(vc: &mut ViewController, line: &str) -> Result<()> {
    let (cmd, rest) = split(line);
    let ui_language = settings::get_settings(vc.state())?.language;

    match cmd {
        "help" => println!("{HELP}"),
        "login" => {
            let (email, r) = split(rest);
            vc.show_login();
            vc.submit_login(email, role(r)?).await?;
        }
        "register" => {
            let (email, rest) = split(rest);
            let (r, name) = split(rest);
            vc.show_register();
            vc.submit_register(auth::Registration {
                email: email.to_string(),
                name: name.to_string(),
                role: role(r)?,
                university: None,
                college: None,
            })
            .await?;
        }
        "demo" => {
            vc.show_login();
            vc.demo_login(role(rest)?).await?;
        }
        "logout" => vc.logout().await?,
        "back" => {
            vc.back();
        }
        "open" => {
            vc.open_channel(&ChannelId::from(rest))?;
        }
        "subscribe" => vc.subscribe(&ChannelId::from(rest)).await?,
        "say" => vc.send_channel_message(rest).await?,
        "publish" => {
            let (kind, url) = split(rest);
            let kind = ContentKind::parse(kind).with_context(|| format!("unknown content type '{kind}'"))?;
            vc.publish_content(NewContent {
                kind,
                url: url.to_string(),
                file_name: url.rsplit('/').next().map(str::to_string),
                thumbnail: None,
            })
            .await?;
        }
        "channels" => {
            vc.back();
        }
        "chats" => {
            vc.open_private_chats();
        }
        "chat" => {
            let me = vc.user().cloned().context("not logged in")?;
            let peer = find_user(vc, rest)?;
            let chat = chats::get_or_create_chat(vc.state(), &me, &peer).await?;
            println!("chat {} with {}", chat.id, peer.name);
            vc.open_private_chats();
        }
        "pm" => {
            let me = vc.user().cloned().context("not logged in")?;
            let (chat_id, text) = split(rest);
            chats::send_private_message(vc.state(), &ChatId::from(chat_id), &me, text).await?;
            vc.open_private_chats();
        }
        "assistant" => {
            vc.open_assistant();
        }
        "ask" => {
            vc.open_assistant();
            let reply = assistant::ask(vc.state(), rest, ui_language).await?;
            println!("{}", reply.text);
            for source in &reply.sources {
                println!("  - {source}");
            }
        }
        "translate" => {
            let (code, text) = split(rest);
            let target = Language::from_code(code).with_context(|| format!("unknown language '{code}'"))?;
            if !target_languages(ui_language).contains(&target) {
                bail!("already reading in {}", target.native_name());
            }
            println!("{}", assistant::translate(vc.state(), text, target, ui_language).await?);
        }
        "settings" => {
            vc.open_profile_settings();
            let mut current = settings::get_settings(vc.state())?;
            for word in rest.split_whitespace() {
                match word {
                    "dark" => current.is_dark_mode = true,
                    "light" => current.is_dark_mode = false,
                    code => {
                        current.language =
                            Language::from_code(code).with_context(|| format!("unknown setting '{code}'"))?
                    }
                }
            }
            let ProfileSettings { is_dark_mode, language } = settings::update_settings(vc.state(), current)?;
            println!("theme: {}, language: {}", if is_dark_mode { "dark" } else { "light" }, language.native_name());
        }
        "profile" => {
            vc.open_profile_settings();
            auth::update_profile(vc.state(), rest, None).await?;
            vc.refresh_session()?;
        }
        "notify" => {
            match notifications::register_device(vc.state(), &UnsupportedRegistrar).await? {
                Some(_) => println!("notifications enabled"),
                None => println!("notifications unavailable"),
            }
            vc.refresh_session()?;
        }
        other => bail!("unknown command '{other}', try 'help'"),
    }
    Ok(())
}

fn find_user(vc: &ViewController, id: &str) -> Result<campus_store::User> {
    let guard = campus_client_lib::state::lock(vc.state())?;
    Ok(guard.repository.get_user(&UserId::from(id))?)
}

fn render(vc: &ViewController) -> Result<()> {
    match vc.view() {
        View::Splash => println!("[{APP_NAME}]"),
        View::Welcome => println!("== welcome: login, register or demo =="),
        View::Auth(mode) => println!("== {mode:?} =="),
        View::Shell { user, screen } => {
            let badge = match vc.dashboard_variant() {
                Some(DashboardVariant::Professor) => format!("{} stars", user.stars()),
                _ => format!("{} DZD", user.balance()),
            };
            println!("== {} ({}, {badge}) ==", user.name, user.role);
            render_screen(vc, user, screen)?;
        }
    }
    Ok(())
}

fn render_screen(vc: &ViewController, user: &campus_store::User, screen: &ShellScreen) -> Result<()> {
    match screen {
        ShellScreen::Dashboard if user.is_professor() => {
            for c in channels::channels_owned_by(vc.state(), &user.id)? {
                println!("  {} {} ({} subscribers)", c.id, c.name, c.subscribers.len());
            }
        }
        ShellScreen::Dashboard => {
            let entries = channels::student_catalog(
                vc.state(),
                user,
                user.university.as_deref(),
                user.college.as_deref(),
            )?;
            for e in entries {
                let mark = if e.is_subscribed { "*" } else { " " };
                println!(" {mark}{} {} / {}", e.channel.id, e.channel.name, e.channel.professor_name);
            }
        }
        ShellScreen::ChannelDetail(ChannelAccess::Denied(c)) => {
            println!("  {} is locked: subscribe to access it", c.name);
        }
        ShellScreen::ChannelDetail(ChannelAccess::Granted(c)) => {
            println!("  {} / {} / meet: {}", c.name, c.professor_name, c.google_meet_link);
            for item in &c.content {
                println!("  [{:?}] {}", item.kind, item.file_name.as_deref().unwrap_or(&item.url));
            }
            for m in &c.chat_messages {
                println!("  {} {}: {}", m.timestamp.format("%H:%M"), m.sender_name, m.text);
            }
        }
        ShellScreen::PrivateChats => {
            for conv in chats::conversations_for(vc.state(), &user.id)? {
                println!("  {} with {}", conv.chat.id, conv.peer_name);
                for m in &conv.chat.messages {
                    println!("    {} {}: {}", m.timestamp.format("%H:%M"), m.sender_name, m.text);
                }
            }
        }
        ShellScreen::ProfileSettings => println!("  {} <{}>", user.name, user.email),
        ShellScreen::Assistant => println!("  ask <question> | translate <lang> <text>"),
    }
    Ok(())
}
