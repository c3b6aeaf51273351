use std::borrow::Cow;
use std::ffi::OsString;

use percent_encoding::{percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::platform::{resolve_fallback_opener, Platform, PlatformContext, WSL_VIEWER};
use crate::{OpenError, OpenOptions};

/// Characters left intact by the transform behind
/// [`OpenOptions::url`]: the unreserved set plus the reserved URI
/// delimiters, so scheme and path structure survive encoding.
const ENCODE_URI: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')')
    .remove(b';')
    .remove(b'/')
    .remove(b'?')
    .remove(b':')
    .remove(b'@')
    .remove(b'&')
    .remove(b'=')
    .remove(b'+')
    .remove(b'$')
    .remove(b',')
    .remove(b'#');

fn encode_uri(target: &str) -> Cow<'_, str> {
    percent_encode(target.as_bytes(), ENCODE_URI).into()
}

/// A resolved opener invocation: the program to spawn and its argument
/// vector. Built fresh for every call, never cached.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LaunchCommand {
    pub program: OsString,
    pub args: Vec<OsString>,
}

/// Builds the platform-specific opener invocation for `target`.
///
/// Pure apart from the bundled-helper probe, which only runs on the
/// [`Platform::Unix`] branch when no app was requested outside WSL.
pub(crate) async fn build_command(
    target: &str,
    options: &OpenOptions,
    ctx: &PlatformContext,
) -> Result<LaunchCommand, OpenError> {
    let target = if options.url {
        encode_uri(target)
    } else {
        Cow::Borrowed(target)
    };

    let program: OsString;
    let mut args: Vec<OsString> = Vec::new();

    match ctx.platform {
        Platform::MacOs => {
            program = "open".into();
            if options.wait {
                args.push("--wait-apps".into());
            }
            if options.background {
                args.push("--background".into());
            }
            if let Some(app) = &options.app {
                args.push("-a".into());
                args.push(app.into());
            }
        }
        Platform::Windows => {
            program = "cmd".into();
            // `start` reads its first quoted argument as a window
            // title; the empty title keeps the target out of that slot.
            args.extend(["/c".into(), "start".into(), "".into()]);
            if options.wait {
                args.push("/wait".into());
            }
            if let Some(app) = &options.app {
                args.push(app.into());
            }
            args.extend(options.app_args.iter().map(OsString::from));
        }
        Platform::Unix => {
            program = match &options.app {
                Some(app) => app.into(),
                None if ctx.wsl => WSL_VIEWER.into(),
                None => resolve_fallback_opener(ctx).await?,
            };
            args.extend(options.app_args.iter().map(OsString::from));
        }
    }

    if ctx.platform == Platform::Windows {
        // `&` separates commands inside cmd.exe; quote each one so it
        // reaches the default handler literally.
        args.push(target.replace('&', "\"&\"").into());
    } else {
        args.push(target.as_ref().into());
    }

    // `open` forwards everything after `--args` to the launched app
    // without parsing any of it itself.
    if ctx.platform == Platform::MacOs && !options.app_args.is_empty() {
        args.push("--args".into());
        args.extend(options.app_args.iter().map(OsString::from));
    }

    Ok(LaunchCommand { program, args })
}
