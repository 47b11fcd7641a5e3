//! Declarative helpers shared by the message catalogs.

/// Define an enumeration whose variants map onto OCPP wire strings.
///
/// Generates serde support with the exact wire names, `as_str`,
/// `Display`, `FromStr` and an `ALL` table. `Variant => "wire" | "alias"`
/// also accepts `alias` when reading; writing always uses `wire`.
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $wire:literal $(| $alias:literal)* ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        $vis enum $name {
            $( $(#[$vmeta])* #[serde(rename = $wire $(, alias = $alias)*)] $variant ),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::error::ParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($wire $(| $alias)* => Ok($name::$variant),)+
                    other => Err($crate::error::ParseError::UnknownVariant {
                        kind: stringify!($name),
                        value: other.to_string(),
                    }),
                }
            }
        }
    };
}

/// Pair a request type with its response type under one action.
///
/// The `xml:` form also binds both types to a SOAP service namespace.
macro_rules! message_pair {
    ($version:ident, $action:literal, $req:ty => $resp:ty, xml: $ns:expr) => {
        message_pair!($version, $action, $req => $resp);

        impl $crate::xml::XmlMessage for $req {
            const XML_NAMESPACE: &'static str = $ns;
        }

        impl $crate::xml::XmlMessage for $resp {
            const XML_NAMESPACE: &'static str = $ns;
        }
    };
    ($version:ident, $action:literal, $req:ty => $resp:ty) => {
        impl $crate::common::OcppMessage for $req {
            const ACTION: &'static str = $action;
            const KIND: $crate::common::MessageKind = $crate::common::MessageKind::Request;
            const VERSION: $crate::common::OcppVersion = $crate::common::OcppVersion::$version;
        }

        impl $crate::common::OcppMessage for $resp {
            const ACTION: &'static str = $action;
            const KIND: $crate::common::MessageKind = $crate::common::MessageKind::Response;
            const VERSION: $crate::common::OcppVersion = $crate::common::OcppVersion::$version;
        }

        impl $crate::common::OcppRequest for $req {
            type Response = $resp;
        }

        impl $crate::common::OcppResponse for $resp {
            type Request = $req;
        }
    };
}

/// Types without any rule beyond what their field types already enforce.
macro_rules! unconstrained {
    ($($ty:ty),+ $(,)?) => {
        $( impl $crate::common::Validate for $ty {} )+
    };
}

/// Sum type over every request (or response) of one OCPP version.
///
/// Variant names must match the version's `Action` variants so that the
/// action-driven dispatch is exhaustive. The `xml` form adds dispatch by
/// SOAP body element.
macro_rules! message_set {
    (
        xml
        $(#[$meta:meta])*
        $vis:vis enum $name:ident for $action:ident {
            $( $variant:ident($ty:ty) ),+ $(,)?
        }
    ) => {
        message_set! {
            $(#[$meta])*
            $vis enum $name for $action {
                $( $variant($ty) ),+
            }
        }

        impl $name {
            /// Parse a SOAP body element, picking the type by element name
            pub fn try_from_xml(
                element: &$crate::xml::XmlElement,
            ) -> Result<Self, $crate::error::ParseError> {
                Self::try_from_xml_in(element, &$crate::config::CodecConfig::default())
            }

            pub fn try_from_xml_in(
                element: &$crate::xml::XmlElement,
                config: &$crate::config::CodecConfig,
            ) -> Result<Self, $crate::error::ParseError> {
                use $crate::xml::XmlMessage;
                $(
                    if element.name == <$ty as XmlMessage>::xml_name() {
                        let message = <$ty as XmlMessage>::try_from_xml_with(element, config, None)?;
                        return Ok($name::$variant(message));
                    }
                )+
                Err($crate::error::ParseError::UnknownAction(element.name.clone()))
            }

            pub fn to_xml(&self) -> $crate::xml::XmlElement {
                use $crate::xml::XmlMessage;
                match self {
                    $($name::$variant(message) => message.to_xml()),+
                }
            }
        }
    };
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident for $action:ident {
            $( $variant:ident($ty:ty) ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        $vis enum $name {
            $( $variant($ty) ),+
        }

        impl $name {
            pub fn action(&self) -> $action {
                match self {
                    $($name::$variant(_) => $action::$variant),+
                }
            }

            /// Parse the JSON payload belonging to `action`
            pub fn try_from_json(
                action: $action,
                payload: &serde_json::Value,
            ) -> Result<Self, $crate::error::ParseError> {
                use $crate::common::OcppMessage;
                match action {
                    $($action::$variant => Ok($name::$variant(<$ty as OcppMessage>::try_from_json(payload)?))),+
                }
            }

            pub fn to_json(&self) -> serde_json::Value {
                use $crate::common::OcppMessage;
                match self {
                    $($name::$variant(message) => message.to_json()),+
                }
            }

            pub fn to_json_ld(&self) -> serde_json::Value {
                use $crate::common::OcppMessage;
                match self {
                    $($name::$variant(message) => message.to_json_ld()),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    $($name::$variant(message) => std::fmt::Display::fmt(message, f)),+
                }
            }
        }

        $(
            impl From<$ty> for $name {
                fn from(message: $ty) -> Self {
                    $name::$variant(message)
                }
            }
        )+
    };
}
