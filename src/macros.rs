/// Reports an event to Rollbar using the process-wide client.
///
/// This macro will generate and submit an event to Rollbar using the default client.
/// It supports messages and errors, and allows you to specify any of the supported
/// reporting fields.
///
/// # Examples
/// ## Messages
/// ```
/// use rollbar_demo::*;
///
/// rollbar!(Debug message = "This is an example message", { foo: "bar" }, context = "project#index");
/// ```
///
/// ## Errors
/// ```
/// use rollbar_demo::*;
///
/// let err = std::io::Error::new(std::io::ErrorKind::Other, "Some error");
/// rollbar!(Critical error = err, context = "project#index");
/// ```
///
/// ## Custom Fields
/// You can also specify custom fields which are included in your event by setting
/// the `custom` field. A `map!` macro is provided to simplify the generation of
/// the appropriate data structure.
/// ```
/// use rollbar_demo::*;
///
/// rollbar!(Info message = "This is an example with custom fields.", { foo: "bar" }, custom = map!{ owner: "Bob" });
/// ```
#[macro_export]
macro_rules! rollbar {
    ($($args:tt)*) => {
        $crate::report($crate::rollbar_format!($($args)*))
    };
}

/// Generates a Rollbar data payload which can be submitted to the Rollbar API.
///
/// This macro is intended to be used to generate the reporting payload
/// that your application uses to send events to Rollbar when working with
/// a custom client. Under normal conditions, you will use the [`rollbar!`]
/// macro instead.
///
/// # Examples
/// ## Messages
/// ```
/// use rollbar_demo::*;
///
/// let client = Client::with_default_transport(Configuration::default()).unwrap();
/// client.report(rollbar_format!(Debug message = "This is an example message", { foo: "bar" }, context = "project#index"));
/// ```
///
/// ## Errors
/// ```
/// use rollbar_demo::*;
///
/// let err = std::io::Error::new(std::io::ErrorKind::Other, "Some error");
/// let client = Client::with_default_transport(Configuration::default()).unwrap();
/// client.report(rollbar_format!(Critical error = err, context = "project#index"));
/// ```
#[macro_export]
macro_rules! rollbar_format {
    (message = $msg:expr $(, { $($extra_key:ident: $extra_val:expr),+ })? $(,$key:ident = $val:expr)*) => {
        $crate::rollbar_format!(Info message = $msg $(, { $($extra_key: $extra_val),+ })? $(,$key = $val)*)
    };

    ($level:ident message = $msg:expr $(, { $($extra_key:ident: $extra_val:expr),+ })? $(,$key:ident = $val:expr)*) => {
        $crate::types::Data {
            body: $crate::types::Body::Message($crate::types::Message {
                body: $msg.into(),
                extra: $crate::map!{$($($extra_key : $extra_val),+)?},
            }),
            level: Some($crate::Level::$level),
            notifier: Some($crate::types::Notifier {
                name: Some($crate::NAME.into()),
                version: Some($crate::VERSION.into()),
            }),
            uuid: Some($crate::helpers::new_uuid()),
            $($key: Some($val.into()),)*
            ..Default::default()
        }
    };

    (error = $err:expr $(,$key:ident = $val:expr)*) => {
        $crate::rollbar_format!(Error error = $err $(,$key = $val)*)
    };

    ($level:ident error = $err:expr $(,$key:ident = $val:expr)*) => {
        {
            let mut frames = $crate::helpers::get_backtrace_frames();

            frames.push($crate::types::Frame {
                filename: file!().to_string(),
                lineno: Some(line!() as i32),
                ..Default::default()
            });

            $crate::types::Data {
                body: $crate::types::Body::Trace($crate::types::Trace {
                    exception: $crate::helpers::get_exception(&$err),
                    frames,
                }),
                level: Some($crate::Level::$level),
                notifier: Some($crate::types::Notifier {
                    name: Some($crate::NAME.into()),
                    version: Some($crate::VERSION.into()),
                }),
                uuid: Some($crate::helpers::new_uuid()),
                $($key: Some($val.into()),)*
                ..Default::default()
            }
        }
    };
}

/// Constructs a generic Rollbar object with the provided keys.
///
/// This macro is intended to be used with the [`rollbar!`] and
/// [`rollbar_format!`] macros to generate fields like `person`,
/// `custom`, and extra message data.
///
/// # Examples
/// ```
/// use rollbar_demo::*;
///
/// rollbar!(message = "Example with custom data", custom = map!{ foo: "bar" });
/// ```
#[macro_export]
macro_rules! map {
    {$($key:ident : $val:expr),* $(,)?} => {
        {
            #[allow(unused_mut)]
            let mut extra: std::collections::HashMap<String, serde_json::Value> = std::collections::HashMap::new();
            $(
                extra.insert(stringify!($key).to_string(), serde_json::json!($val));
            )*

            extra
        }
    };
}

/// Configures Rollbar to handle any panics which occur within your
/// application, reporting them as exceptions at the specified level.
#[macro_export]
macro_rules! handle_panics {
    () => {
        $crate::handle_panics!(Critical)
    };

    ($level:ident $(,$key:ident = $val:expr)*) => {
        ::std::panic::set_hook(::std::boxed::Box::new(move |panic_info| {
            let payload = panic_info.payload();
            let message = match payload.downcast_ref::<&str>() {
                Some(s) => *s,
                None => match payload.downcast_ref::<String>() {
                    Some(s) => s.as_str(),
                    None => "Panic",
                }
            };

            let frames = if let Some(location) = panic_info.location() {
                vec![
                    $crate::types::Frame {
                        filename: location.file().into(),
                        lineno: Some(location.line() as i32),
                        colno: Some(location.column() as i32),
                        ..Default::default()
                    },
                ]
            } else {
                vec![]
            };

            $crate::report($crate::types::Data {
                body: $crate::types::Body::Trace($crate::types::Trace {
                    exception: $crate::types::Exception {
                        class: "<panic>".into(),
                        message: Some(message.into()),
                        description: Some(message.into()),
                    },
                    frames,
                }),
                level: Some($crate::Level::$level),
                notifier: Some($crate::types::Notifier {
                    name: Some($crate::NAME.into()),
                    version: Some($crate::VERSION.into()),
                }),
                uuid: Some($crate::helpers::new_uuid()),
                $($key: Some($val.into()),)*
                ..Default::default()
            });
        }));
    };
}
