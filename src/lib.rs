pub mod core;
pub mod fixtures;
pub mod index;
pub mod query;
pub mod schema;
pub mod storage;

pub use crate::core::config::Config;
pub use crate::core::database::{Database, Snapshot};
pub use crate::core::error::{Error, ErrorKind, Result};

/*
┌──────────────────────────────────── STAYBASE LAYOUT ────────────────────────────────────┐
│                                                                                          │
│  ┌────────────────────────────────────────────────────────────────────────────────┐     │
│  │                              struct Database                                    │     │
│  │  ┌──────────────────────────────────────────────────────────────────────────┐  │     │
│  │  │ config: Config                  // capacities, stats switch              │  │     │
│  │  │ store: RwLock<Store>            // six tables + index set                │  │     │
│  │  │ inserts / deletes: AtomicU64    // write counters                        │  │     │
│  │  └──────────────────────────────────────────────────────────────────────────┘  │     │
│  │  writes: validate (schema::constraints) → mutate rows + indexes, one lock      │     │
│  │  reads:  snapshot() → Snapshot (read guard) → keyed lookups / query catalog    │     │
│  └────────────────────────────────────────────────────────────────────────────────┘     │
│                                                                                          │
│  ┌──────────────────────────┐   ┌──────────────────────────────────────────────────┐    │
│  │ struct Store             │   │ struct Indexes                                    │    │
│  │ • users   properties     │   │ • users_by_email        UniqueIndex (hash)        │    │
│  │ • bookings payments      │   │ • eight FK postings     KeyIndex    (hash)        │    │
│  │ • reviews messages       │   │ • bookings_by_start     RangeIndex  (btree)       │    │
│  │   each a Table<K, R>     │   │ • location+price        RangeIndex  (btree)       │    │
│  │   (rows + scan counter)  │   │   (each with a seek counter)                      │    │
│  └──────────────────────────┘   └──────────────────────────────────────────────────┘    │
│                                                                                          │
│  query/ : seven read operations, pure over &Store, deterministic ordering                │
│  schema/: entities + enums, insert checks, cascade/restrict delete planning              │
└──────────────────────────────────────────────────────────────────────────────────────────┘
*/
