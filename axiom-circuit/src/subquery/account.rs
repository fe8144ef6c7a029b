use axiom_codec::types::native::AccountSubquery;
use ethers_core::types::Address;

use super::SubqueryHandle;
use crate::{error::BuildError, session::BuildSession};

field_enum!(AccountField { Nonce = 0, Balance = 1, StorageRoot = 2, CodeHash = 3 });

pub struct AccountBuilder<'a> {
    session: &'a mut BuildSession,
    block_number: u32,
    addr: Address,
}

impl<'a> AccountBuilder<'a> {
    pub(crate) fn new(session: &'a mut BuildSession, block_number: u32, addr: Address) -> Self {
        Self { session, block_number, addr }
    }

    pub fn field(&mut self, field: AccountField) -> Result<SubqueryHandle, BuildError> {
        self.session.register(AccountSubquery {
            block_number: self.block_number,
            addr: self.addr,
            field_idx: field.into(),
        })
    }

    field_accessors!(AccountField {
        nonce => Nonce,
        balance => Balance,
        storage_root => StorageRoot,
        code_hash => CodeHash,
    });
}
