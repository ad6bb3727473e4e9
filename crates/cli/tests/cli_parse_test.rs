use clap::Parser;
use feedwatch::commands::channel::ChannelCommands;
use feedwatch::commands::state::StateCommands;
use feedwatch::Commands;

#[derive(Parser, Debug)]
struct TestCli {
    #[command(subcommand)]
    command: Commands,
}

fn parse(args: &[&str]) -> Commands {
    TestCli::try_parse_from(std::iter::once("feedwatch").chain(args.iter().copied()))
        .unwrap()
        .command
}

#[test]
fn test_run_flags() {
    match parse(&["run", "--once", "--interval", "60"]) {
        Commands::Run { once, interval } => {
            assert!(once);
            assert_eq!(interval, Some(60));
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn test_channel_add() {
    match parse(&[
        "channel",
        "add",
        "--name",
        "LTT",
        "--url",
        "https://www.youtube.com/@LinusTechTips",
        "--webhook-env",
        "LTT_WEBHOOK",
    ]) {
        Commands::Channel {
            command:
                ChannelCommands::Add {
                    name,
                    webhook_env,
                    webhook_url,
                    ..
                },
        } => {
            assert_eq!(name, "LTT");
            assert_eq!(webhook_env, "LTT_WEBHOOK");
            assert!(webhook_url.is_none());
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn test_channel_edit_and_aliases() {
    assert!(matches!(
        parse(&["c", "ls"]),
        Commands::Channel {
            command: ChannelCommands::List
        }
    ));

    match parse(&["channel", "edit", "LTT", "--webhook-url", "https://discord.test/x"]) {
        Commands::Channel {
            command:
                ChannelCommands::Edit {
                    name,
                    new_name,
                    webhook_url,
                    ..
                },
        } => {
            assert_eq!(name, "LTT");
            assert!(new_name.is_none());
            assert_eq!(webhook_url.as_deref(), Some("https://discord.test/x"));
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn test_state_forget() {
    match parse(&["state", "forget", "youtube", "https://www.youtube.com/@mkbhd"]) {
        Commands::State {
            platform: None,
            command: Some(StateCommands::Forget { platform, source }),
        } => {
            assert_eq!(platform, "youtube");
            assert_eq!(source, "https://www.youtube.com/@mkbhd");
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn test_add_requires_webhook_env() {
    let result = TestCli::try_parse_from(["feedwatch", "channel", "add", "--name", "x", "--url", "y"]);
    assert!(result.is_err());
}
