use fnv::FnvHashMap;
use once_cell::sync::Lazy;
use smallvec::SmallVec;

use crate::{
    layout::{
        LayoutError,
        PayloadLayout,
    },
    Direction,
    MessageKind,
    MessageTypeId,
};

/// The process-wide registry of every known message type. Built on first use, never mutated
/// afterwards, so it can be read from any thread.
pub static REGISTRY: Lazy<Registry> = Lazy::new(Registry::standard);

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Entry {
    pub id:        MessageTypeId,
    pub direction: Direction,
    pub kind:      MessageKind,
    pub layout:    &'static PayloadLayout,
}

impl Entry {
    pub const fn of(kind: MessageKind) -> Self {
        Self {
            id: kind.id(),
            direction: kind.direction(),
            kind,
            layout: kind.layout(),
        }
    }
}

impl From<MessageKind> for Entry {
    #[inline]
    fn from(kind: MessageKind) -> Self {
        Self::of(kind)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("invalid layout for {kind:?}: {source}")]
    InvalidLayout {
        kind:   MessageKind,
        #[source]
        source: LayoutError,
    },

    #[error("{kind:?} is already registered for {id} ({direction:?})")]
    Duplicate {
        kind:      MessageKind,
        id:        MessageTypeId,
        direction: Direction,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    #[error("no {direction:?} message is registered for {id}")]
    Unknown {
        id:        MessageTypeId,
        direction: Direction,
    },

    #[error("{id} is ambiguous between {candidates:?}")]
    Ambiguous {
        id:         MessageTypeId,
        candidates: Vec<MessageKind>,
    },
}

type Entries = FnvHashMap<MessageTypeId, SmallVec<[Entry; 2]>>;

/// Collects registrations; [`RegistryBuilder::build`] freezes them into a [`Registry`].
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    entries: Entries,
}

impl RegistryBuilder {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry. Its layout must validate, and the same kind can't be registered twice
    /// for one id and direction. Different kinds may share an id and direction; lookups
    /// for that pair then report the ambiguity.
    pub fn register(&mut self, entry: impl Into<Entry>) -> Result<&mut Self, RegistryError> {
        let entry = entry.into();

        entry.layout.validate().map_err(|source| RegistryError::InvalidLayout {
            kind: entry.kind,
            source,
        })?;

        let slot = self.entries.entry(entry.id).or_default();

        if slot.iter().any(|e| e.kind == entry.kind && e.direction == entry.direction) {
            return Err(RegistryError::Duplicate {
                kind:      entry.kind,
                id:        entry.id,
                direction: entry.direction,
            });
        }

        slot.push(entry);

        Ok(self)
    }

    pub fn build(self) -> Registry {
        Registry {
            entries: self.entries,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Registry {
    entries: Entries,
}

impl Registry {
    #[inline]
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// A registry containing every [`MessageKind`].
    #[tracing::instrument(level = "debug")]
    pub fn standard() -> Self {
        let mut builder = Self::builder();

        for kind in MessageKind::ALL {
            builder.register(kind).expect("built-in message layouts are valid");
        }

        let registry = builder.build();
        tracing::debug!(ids = registry.entries.len(), "message registry initialized");

        registry
    }

    /// Everything registered under `id`, regardless of direction.
    pub fn candidates(&self, id: MessageTypeId) -> &[Entry] {
        self.entries.get(&id).map(|v| v.as_slice()).unwrap_or(&[])
    }

    /// Resolve `id` for messages travelling in `direction`.
    pub fn lookup(&self, id: MessageTypeId, direction: Direction) -> Result<&Entry, LookupError> {
        let matching = self
            .candidates(id)
            .iter()
            .filter(|e| e.direction == direction)
            .collect::<SmallVec<[&Entry; 2]>>();

        match matching.as_slice() {
            [] => Err(LookupError::Unknown {
                id,
                direction,
            }),
            [entry] => Ok(*entry),
            many => Err(LookupError::Ambiguous {
                id,
                candidates: many.iter().map(|e| e.kind).collect(),
            }),
        }
    }

    #[inline]
    pub fn layout(&self, id: MessageTypeId, direction: Direction) -> Option<&'static PayloadLayout> {
        self.lookup(id, direction).ok().map(|e| e.layout)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.entries.values().flatten()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::layout::Field;

    #[test]
    fn standard_contains_everything() {
        let registry = Registry::standard();

        assert_eq!(registry.iter().count(), MessageKind::ALL.len());

        for kind in MessageKind::ALL {
            assert!(registry.candidates(kind.id()).contains(&Entry::of(kind)), "{kind:?} missing");
            assert_eq!(kind.layout().validate(), Ok(()), "{kind:?}");
        }
    }

    #[test]
    fn lookup_by_direction() {
        let registry = Registry::standard();
        let id = MessageTypeId::new(0x0a, 0xbf, 0x23);

        assert_eq!(registry.candidates(id).len(), 2);

        assert_eq!(
            registry.lookup(id, Direction::Command).map(|e| e.kind),
            Ok(MessageKind::SetFilterConfigRequest)
        );
        assert_eq!(
            registry.lookup(id, Direction::Response).map(|e| e.kind),
            Ok(MessageKind::FilterConfigResponse)
        );
    }

    #[test]
    fn settings_request_is_ambiguous() {
        let registry = Registry::standard();
        let id = MessageTypeId::new(0x0a, 0xbf, 0x22);

        assert_eq!(registry.lookup(id, Direction::Command), Err(LookupError::Ambiguous {
            id,
            candidates: vec![MessageKind::FilterConfigRequest, MessageKind::ControlConfigRequest],
        }));

        assert_eq!(registry.lookup(id, Direction::Response), Err(LookupError::Unknown {
            id,
            direction: Direction::Response,
        }));
        assert_eq!(registry.layout(id, Direction::Command), None);
    }

    #[test]
    fn unknown_id() {
        let id = MessageTypeId::new(0, 0, 0);

        assert!(REGISTRY.candidates(id).is_empty());
        assert_eq!(REGISTRY.layout(id, Direction::Response), None);
    }

    #[test]
    fn layout_lookup() {
        let layout = REGISTRY.layout(MessageTypeId::new(0xff, 0xaf, 0x13), Direction::Response);
        assert_eq!(layout.map(|l| l.size), Some(24));
    }

    #[test]
    fn duplicate_rejected() {
        let mut builder = Registry::builder();
        builder.register(MessageKind::Status).unwrap();

        assert_eq!(builder.register(MessageKind::Status).unwrap_err(), RegistryError::Duplicate {
            kind:      MessageKind::Status,
            id:        MessageKind::Status.id(),
            direction: Direction::Response,
        });
    }

    #[test]
    fn invalid_layout_rejected() {
        const FIELDS: &[Field] = &[Field::byte("a", 0)];
        const BROKEN: PayloadLayout = PayloadLayout::new(2, FIELDS);

        let mut builder = Registry::builder();
        let result = builder.register(Entry {
            layout: &BROKEN,
            ..Entry::of(MessageKind::ControlConfig2Response)
        });

        assert!(matches!(result, Err(RegistryError::InvalidLayout {
            kind: MessageKind::ControlConfig2Response,
            ..
        })));
    }

    #[test]
    fn concurrent_reads() {
        let handles = (0..4)
            .map(|_| {
                std::thread::spawn(|| {
                    MessageKind::ALL
                        .iter()
                        .filter(|k| REGISTRY.lookup(k.id(), k.direction()).is_ok())
                        .count()
                })
            })
            .collect::<Vec<_>>();

        for h in handles {
            // FilterConfigRequest and ControlConfigRequest can't be resolved by id alone
            assert_eq!(h.join().unwrap(), MessageKind::ALL.len() - 2);
        }
    }
}
