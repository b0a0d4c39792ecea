use alloy_sol_types::sol;

pub mod erc20;
pub mod rpc;

sol! {
    interface IERC20 {
        function name() external view returns (string);
        function symbol() external view returns (string);
        function decimals() external view returns (uint8);
        function totalSupply() external view returns (uint256);
        function approve(address spender, uint256 amount) external returns (bool);
    }
}
