//! ABI bindings for the external contracts.
//!
//! Only the members the scripts touch are declared. Parameter names do not
//! affect selectors or event topics, so they follow Rust-friendly spelling.

use alloy::sol;

sol! {
    #[allow(missing_docs)]
    #[derive(Debug, PartialEq, Eq)]
    #[sol(rpc)]
    interface IERC20 {
        event Approval(address indexed owner, address indexed spender, uint256 amount);

        function balanceOf(address account) external view returns (uint256);
        function allowance(address owner, address spender) external view returns (uint256);
        function approve(address spender, uint256 amount) external returns (bool);
    }
}

sol! {
    #[allow(missing_docs)]
    #[derive(Debug, PartialEq, Eq)]
    #[sol(rpc)]
    contract Subscriptions {
        struct Discount {
            uint256 period;
            uint256 amountAsPPM;
        }

        event NewSubscription(
            bytes32 hexId,
            address indexed participant,
            uint256 indexed author,
            uint256 subscriptionIndex,
            uint256 subscriptionEndTime,
            address tokenAddress,
            uint256 amount
        );
        event NewOneTimeSubscriptionCreated(
            uint256 indexed author,
            bytes32 hexId,
            address[] tokenAddresses,
            Discount[] discounts
        );
        event NewRegularSubscriptionCreated(
            uint256 indexed author,
            bytes32 hexId,
            address[] tokenAddresses,
            uint256 paymentPeriod,
            Discount[] discounts
        );

        function getTotalPaymentAmountForPeriod(uint256 author, uint256 subscriptionId, uint256 periods)
            external view returns (uint256 amount, uint256 amountInEth);

        function subscriptionPayment(uint256 author, uint256 subscriptionId, address tokenAddress, uint256 periods)
            external payable;

        function createNewSubscriptionByEth(
            bytes32 hexId,
            uint256 author,
            bool isRegularSubscription,
            uint256 paymentPeriod,
            uint256 price,
            Discount[] discountProgram
        ) external;

        function createNewSubscriptionByToken(
            bytes32 hexId,
            uint256 author,
            bool isRegularSubscription,
            uint256 paymentPeriod,
            address[] tokenAddresses,
            uint256 price,
            Discount[] discountProgram
        ) external;
    }
}

sol! {
    #[allow(missing_docs)]
    #[derive(Debug, PartialEq, Eq)]
    #[sol(rpc)]
    contract MainNFT {
        function priceToMint(address minter) external view returns (uint256);
        function safeMint() external payable;
        function balanceOf(address owner) external view returns (uint256);
        function tokenOfOwnerByIndex(address owner, uint256 index) external view returns (uint256);
        function donateTokenAddressesByAuthorCount(uint256 author) external view returns (uint256);
        function donateTokenAddressesByAuthor(uint256 author, uint256 index) external view returns (address);
    }
}

sol! {
    #[allow(missing_docs)]
    #[derive(Debug, PartialEq, Eq)]
    #[sol(rpc)]
    contract PublicDonation {
        function donateEth(uint256 author) external payable;
        function donateFromSwap(address tokenAddress, uint256 amount, uint256 author) external;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::keccak256;
    use alloy::sol_types::{SolCall, SolEvent};

    #[test]
    fn test_erc20_selectors() {
        assert_eq!(IERC20::approveCall::SELECTOR, [0x09, 0x5e, 0xa7, 0xb3]);
        assert_eq!(IERC20::balanceOfCall::SELECTOR, [0x70, 0xa0, 0x82, 0x31]);
        assert_eq!(IERC20::allowanceCall::SELECTOR, [0xdd, 0x62, 0xed, 0x3e]);
    }

    #[test]
    fn test_event_signatures() {
        assert_eq!(
            Subscriptions::NewSubscription::SIGNATURE,
            "NewSubscription(bytes32,address,uint256,uint256,uint256,address,uint256)"
        );
        assert_eq!(
            Subscriptions::NewRegularSubscriptionCreated::SIGNATURE,
            "NewRegularSubscriptionCreated(uint256,bytes32,address[],uint256,(uint256,uint256)[])"
        );
        assert_eq!(
            Subscriptions::NewOneTimeSubscriptionCreated::SIGNATURE_HASH,
            keccak256("NewOneTimeSubscriptionCreated(uint256,bytes32,address[],(uint256,uint256)[])")
        );
    }
}
