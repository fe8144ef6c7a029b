use axiom_codec::types::native::StorageSubquery;
use ethers_core::types::{Address, U256};

use super::SubqueryHandle;
use crate::{error::BuildError, session::BuildSession};

pub struct StorageBuilder<'a> {
    session: &'a mut BuildSession,
    block_number: u32,
    addr: Address,
}

impl<'a> StorageBuilder<'a> {
    pub(crate) fn new(session: &'a mut BuildSession, block_number: u32, addr: Address) -> Self {
        Self { session, block_number, addr }
    }

    pub fn slot(&mut self, slot: impl Into<U256>) -> Result<SubqueryHandle, BuildError> {
        self.session.register(StorageSubquery {
            block_number: self.block_number,
            addr: self.addr,
            slot: slot.into(),
        })
    }
}
