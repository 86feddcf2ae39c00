//! RunContext compartido entre workers.
//!
//! - Claves de bloque únicas; el orden de inserción se retiene para la
//!   persistencia.
//! - La mutación pasa únicamente por `merge`, serializada por nombre de
//!   bloque (sección crítica por entrada del mapa): dos targets concurrentes
//!   del mismo bloque de firma nunca se pierden resultados.
//! - Los sub-bloques ya resueltos son snapshots inmutables; leerlos no
//!   necesita lock.
use std::sync::Mutex;

use dashmap::DashMap;
use uuid::Uuid;

use sign_domain::ContextBlock;

use crate::errors::CoreError;

pub struct RunContext {
    run_id: Uuid,
    blocks: DashMap<String, ContextBlock>,
    order: Mutex<Vec<String>>,
}

impl RunContext {
    pub fn new() -> Self {
        Self { run_id: Uuid::new_v4(),
               blocks: DashMap::new(),
               order: Mutex::new(Vec::new()) }
    }

    /// Construye el contexto preservando el orden de bloques del fichero.
    pub fn from_blocks(blocks: impl IntoIterator<Item = (String, ContextBlock)>) -> Self {
        let ctx = Self::new();
        for (name, block) in blocks {
            ctx.merge(name, block);
        }
        ctx
    }

    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    /// Snapshot clonado de un bloque por nombre.
    pub fn get(&self, name: &str) -> Option<ContextBlock> {
        self.blocks.get(name).map(|b| b.clone())
    }

    /// Como `get`, con error explícito del pipeline.
    pub fn resolve(&self, name: &str) -> Result<ContextBlock, CoreError> {
        self.get(name)
            .ok_or_else(|| CoreError::BlockNotFound(name.to_string()))
    }

    /// Instala o fusiona un bloque bajo `name`. Si ya hay un bloque de firma
    /// con ese nombre, los `results` del entrante se integran por target
    /// (el último escribe gana por target); cualquier otra combinación
    /// reemplaza el bloque completo.
    pub fn merge(&self, name: impl Into<String>, incoming: ContextBlock) {
        let name = name.into();
        let mut inserted = false;
        {
            match self.blocks.entry(name.clone()) {
                dashmap::mapref::entry::Entry::Occupied(mut occ) => {
                    match (occ.get_mut(), incoming) {
                        (ContextBlock::Signing(stored), ContextBlock::Signing(sub)) => {
                            for (target, record) in sub.results {
                                stored.results.insert(target, record);
                            }
                        }
                        (slot, other) => *slot = other,
                    }
                }
                dashmap::mapref::entry::Entry::Vacant(vac) => {
                    vac.insert(incoming);
                    inserted = true;
                }
            }
        }
        // el lock de orden se toma fuera de la sección crítica del shard
        if inserted {
            self.order
                .lock()
                .expect("block order lock")
                .push(name);
        }
    }

    /// Indica si algún bloque de firma acumuló resultados (para decidir si
    /// persistir en un abort).
    pub fn has_results(&self) -> bool {
        self.blocks.iter().any(|entry| match entry.value() {
            ContextBlock::Signing(b) => !b.results.is_empty(),
            ContextBlock::Raw(_) => false,
        })
    }

    /// Snapshot ordenado para la persistencia. Es un barrier lógico: el
    /// runner garantiza que no quedan `do_work` en vuelo antes de llamarlo.
    pub fn snapshot(&self) -> Vec<(String, ContextBlock)> {
        let order = self.order.lock().expect("block order lock");
        order.iter()
             .filter_map(|name| self.get(name).map(|b| (name.clone(), b)))
             .collect()
    }
}

impl Default for RunContext {
    fn default() -> Self {
        Self::new()
    }
}
